use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::{DataPoint, DomainRange};
use crate::error::{ChartError, ChartResult};

/// Packed `(x0, y0, x1, y1, ...)` coordinate storage for one representation
/// of a series.
///
/// Storage is shared and immutable: cloning a buffer aliases the same
/// allocation and decimation always produces a new buffer. `point_count` is
/// authoritative and may be smaller than `coords.len() / 2` when the producer
/// over-allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    coords: Arc<[f64]>,
    point_count: usize,
}

impl PointBuffer {
    /// Wraps packed coordinates; a trailing odd value is ignored.
    #[must_use]
    pub fn new(coords: impl Into<Arc<[f64]>>) -> Self {
        let coords = coords.into();
        let point_count = coords.len() / 2;
        Self {
            coords,
            point_count,
        }
    }

    /// Wraps packed coordinates with an explicit point count.
    pub fn with_point_count(coords: impl Into<Arc<[f64]>>, point_count: usize) -> ChartResult<Self> {
        let coords = coords.into();
        let required = point_count.checked_mul(2).ok_or_else(|| {
            ChartError::InvalidData("point count overflows coordinate length".to_owned())
        })?;
        if required > coords.len() {
            return Err(ChartError::InvalidData(format!(
                "point count {point_count} needs {required} coordinates, buffer holds {}",
                coords.len()
            )));
        }
        Ok(Self {
            coords,
            point_count,
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn from_points(points: &[DataPoint]) -> Self {
        let mut coords = Vec::with_capacity(points.len() * 2);
        for point in points {
            coords.push(point.x);
            coords.push(point.y);
        }
        Self::new(coords)
    }

    /// Builds an ordered time series from timestamped decimal samples.
    pub fn from_decimal_samples(samples: &[(DateTime<Utc>, Decimal)]) -> ChartResult<Self> {
        let mut coords = Vec::with_capacity(samples.len() * 2);
        for (time, value) in samples {
            let point = DataPoint::from_decimal_time(*time, *value)?;
            coords.push(point.x);
            coords.push(point.y);
        }
        Ok(Self::new(coords))
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Coordinates of the live points only (`point_count * 2` values).
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.point_count * 2]
    }

    /// Length of the underlying allocation in `f64` values.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.coords.len()
    }

    /// Size in bytes of the underlying allocation.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.coords.len() * std::mem::size_of::<f64>()
    }

    /// # Panics
    ///
    /// Panics if `index >= point_count`.
    #[must_use]
    pub fn point(&self, index: usize) -> DataPoint {
        assert!(index < self.point_count, "point index out of bounds");
        DataPoint::new(self.coords[index * 2], self.coords[index * 2 + 1])
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<DataPoint> {
        (index < self.point_count).then(|| self.point(index))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DataPoint> + '_ {
        self.coords()
            .chunks_exact(2)
            .map(|pair| DataPoint::new(pair[0], pair[1]))
    }

    /// Whether both buffers share the same allocation.
    #[must_use]
    pub fn shares_storage_with(&self, other: &PointBuffer) -> bool {
        Arc::ptr_eq(&self.coords, &other.coords)
    }

    /// Min/max of finite x values, `None` when no finite x exists.
    #[must_use]
    pub fn x_range(&self) -> Option<DomainRange> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in self.iter().filter(|point| point.x.is_finite()) {
            min = min.min(point.x);
            max = max.max(point.x);
        }
        (min <= max).then(|| DomainRange::new(min, max))
    }

    /// Number of points whose x falls inside an inclusive range.
    #[must_use]
    pub fn count_in_range(&self, range: DomainRange) -> usize {
        self.iter().filter(|point| range.contains(point.x)).count()
    }

    /// Points whose x falls inside an inclusive range, in buffer order.
    #[must_use]
    pub fn points_in_range(&self, range: DomainRange) -> PointBuffer {
        let mut coords = Vec::new();
        for point in self.iter().filter(|point| range.contains(point.x)) {
            coords.push(point.x);
            coords.push(point.y);
        }
        Self::new(coords)
    }

    /// Gathers the points at `indices` into a new buffer.
    pub(crate) fn gather(&self, indices: impl IntoIterator<Item = usize>) -> PointBuffer {
        let coords: Vec<f64> = indices
            .into_iter()
            .flat_map(|index| [self.coords[index * 2], self.coords[index * 2 + 1]])
            .collect();
        Self::new(coords)
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<f64>> for PointBuffer {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl From<&[DataPoint]> for PointBuffer {
    fn from(points: &[DataPoint]) -> Self {
        Self::from_points(points)
    }
}
