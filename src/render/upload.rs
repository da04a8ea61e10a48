use crate::core::PointBuffer;
use crate::error::{ChartError, ChartResult};

/// Buffer handed to the rendering pipeline when a series switches level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesUpload<'a> {
    pub series_id: &'a str,
    pub level: usize,
    pub points: &'a PointBuffer,
}

impl<'a> SeriesUpload<'a> {
    #[must_use]
    pub fn new(series_id: &'a str, level: usize, points: &'a PointBuffer) -> Self {
        Self {
            series_id,
            level,
            points,
        }
    }

    /// Structural checks only; coordinates are not scanned.
    pub fn validate(&self) -> ChartResult<()> {
        if self.series_id.is_empty() {
            return Err(ChartError::InvalidData(
                "upload series id must not be empty".to_owned(),
            ));
        }
        if self.points.point_count() * 2 > self.points.capacity() {
            return Err(ChartError::InvalidData(format!(
                "upload for `{}` declares more points than its buffer holds",
                self.series_id
            )));
        }
        Ok(())
    }
}
