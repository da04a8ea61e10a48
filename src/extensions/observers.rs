use serde::{Deserialize, Serialize};

use crate::core::{DomainRange, Viewport};

/// Read-only chart snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LodContext {
    pub viewport: Viewport,
    pub visible_range: DomainRange,
    pub full_range: DomainRange,
    pub series_count: usize,
}

/// LOD lifecycle events emitted by [`crate::api::LodChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LodEvent {
    LevelsGenerated {
        series_id: String,
        levels: usize,
        source_count: usize,
    },
    /// The chart uploaded a different level for a series. `from` is `None`
    /// for the first upload after loading.
    LevelChanged {
        series_id: String,
        from: Option<usize>,
        to: usize,
        point_count: usize,
    },
    SeriesRemoved {
        series_id: String,
    },
    VisibleRangeChanged {
        range: DomainRange,
    },
}

/// Hook interface for telemetry or custom overlays that track level switches.
pub trait LodObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &LodEvent, context: LodContext);
}
