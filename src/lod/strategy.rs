use serde::{Deserialize, Serialize};

use crate::core::PointBuffer;

use super::{douglas_peucker, grid_decimate, lttb};

/// Decimation algorithm used to build the coarser levels of a series.
///
/// Callers pick explicitly: ordered line/time series use [`Self::Lttb`],
/// scatter and bubble series use [`Self::SpatialGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecimationStrategy {
    #[default]
    Lttb,
    SpatialGrid,
    /// Error-bounded simplification; the result is capped to the requested
    /// count with LTTB when the tolerance alone keeps too many points.
    DouglasPeucker { epsilon: f64 },
}

impl DecimationStrategy {
    /// Reduces `buffer` to at most `target` points.
    #[must_use]
    pub fn decimate(self, buffer: &PointBuffer, target: usize) -> PointBuffer {
        match self {
            Self::Lttb => lttb(buffer, target),
            Self::SpatialGrid => grid_decimate(buffer, target),
            Self::DouglasPeucker { epsilon } => {
                let simplified = douglas_peucker(buffer, epsilon);
                lttb(&simplified, target)
            }
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lttb => "lttb",
            Self::SpatialGrid => "spatial_grid",
            Self::DouglasPeucker { .. } => "douglas_peucker",
        }
    }
}
