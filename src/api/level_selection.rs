use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartResult;
use crate::extensions::LodEvent;
use crate::render::{Renderer, SeriesUpload};

use super::LodChart;

/// One re-upload performed by [`LodChart::refresh_levels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSwitch {
    pub series_id: String,
    pub from: Option<usize>,
    pub to: usize,
    pub point_count: usize,
}

impl<R: Renderer> LodChart<R> {
    /// Runs level selection for every loaded series against the current
    /// viewport and visible range, uploading series whose level changed.
    ///
    /// Returns the switches in series load order. A failed upload aborts the
    /// pass; series already switched keep their new record.
    pub fn refresh_levels(&mut self) -> ChartResult<Vec<LevelSwitch>> {
        let visible = self.window.visible_range();
        let width_px = f64::from(self.viewport.width);
        let mut switches = Vec::new();

        for (series_id, state) in &mut self.series {
            let level = self
                .manager
                .select(series_id, width_px, visible, state.full_range)?;
            if state.current_level == Some(level.level()) {
                continue;
            }

            self.renderer
                .upload(&SeriesUpload::new(series_id, level.level(), level.data()))?;
            debug!(
                series_id = %series_id,
                from = ?state.current_level,
                to = level.level(),
                point_count = level.point_count(),
                "switched lod level"
            );
            switches.push(LevelSwitch {
                series_id: series_id.clone(),
                from: state.current_level,
                to: level.level(),
                point_count: level.point_count(),
            });
            state.current_level = Some(level.level());
        }

        for switch in &switches {
            self.emit_event(LodEvent::LevelChanged {
                series_id: switch.series_id.clone(),
                from: switch.from,
                to: switch.to,
                point_count: switch.point_count,
            });
        }

        Ok(switches)
    }
}
