use tracing::{debug, warn};

use crate::core::{DomainRange, PointBuffer};
use crate::error::{ChartError, ChartResult};
use crate::extensions::LodEvent;
use crate::lod::DecimationStrategy;
use crate::render::Renderer;

use super::{LevelSwitch, LodChart, SeriesState};

impl<R: Renderer> LodChart<R> {
    /// Loads an x-ordered line/time series, decimated with LTTB.
    pub fn load_series(
        &mut self,
        series_id: &str,
        buffer: PointBuffer,
    ) -> ChartResult<Vec<LevelSwitch>> {
        self.load_series_with(series_id, buffer, DecimationStrategy::Lttb)
    }

    /// Loads an unordered scatter/bubble series, decimated on a spatial grid.
    pub fn load_scatter_series(
        &mut self,
        series_id: &str,
        buffer: PointBuffer,
    ) -> ChartResult<Vec<LevelSwitch>> {
        self.load_series_with(series_id, buffer, DecimationStrategy::SpatialGrid)
    }

    /// Generates levels for a series, replacing any previous data with the
    /// same id, and uploads the level matching the current viewport.
    pub fn load_series_with(
        &mut self,
        series_id: &str,
        buffer: PointBuffer,
        strategy: DecimationStrategy,
    ) -> ChartResult<Vec<LevelSwitch>> {
        if series_id.is_empty() {
            return Err(ChartError::InvalidData(
                "series id must not be empty".to_owned(),
            ));
        }

        let data_range = buffer.x_range();
        let first_series = self.series.is_empty();
        let table = self.manager.generate_with(series_id, buffer, strategy);
        let levels = table.len();
        let source_count = table.original().point_count();
        if let Some(index) = self.spatial_index.as_mut() {
            index.rebuild(series_id, table.original());
        }

        if self.fit_domain_on_load {
            if let Some(range) = data_range {
                let fitted = if first_series {
                    self.window.set_full_range(range.min, range.max)
                } else {
                    self.window.include_range(range)
                };
                if let Err(err) = fitted {
                    warn!(series_id, error = %err, "skipping domain fit after series load");
                }
            }
        }

        let full_range = data_range.unwrap_or_else(|| self.window.full_range());
        self.series.insert(
            series_id.to_owned(),
            SeriesState {
                full_range,
                current_level: None,
            },
        );
        debug!(series_id, levels, source_count, "loaded series");
        self.emit_event(LodEvent::LevelsGenerated {
            series_id: series_id.to_owned(),
            levels,
            source_count,
        });

        self.refresh_levels()
    }

    /// Drops a series from the manager, renderer and spatial index.
    /// Returns whether the series existed.
    ///
    /// A renderer release failure is returned only after the series is gone
    /// from the chart, the spatial index and observers.
    pub fn remove_series(&mut self, series_id: &str) -> ChartResult<bool> {
        let existed = self.series.shift_remove(series_id).is_some();
        self.manager.remove(series_id);
        if !existed {
            return Ok(false);
        }

        let released = self.renderer.release(series_id);
        if let Some(index) = self.spatial_index.as_mut() {
            index.remove(series_id);
        }
        self.emit_event(LodEvent::SeriesRemoved {
            series_id: series_id.to_owned(),
        });
        if let Err(err) = &released {
            warn!(series_id, error = %err, "renderer failed to release series buffer");
        }
        released.map(|()| true)
    }

    /// Removes every series; used on chart disposal. Every series is removed
    /// even when a release fails; the first failure is returned.
    pub fn clear(&mut self) -> ChartResult<()> {
        let ids: Vec<String> = self.series.keys().cloned().collect();
        let mut first_error = None;
        for series_id in ids {
            if let Err(err) = self.remove_series(&series_id) {
                first_error.get_or_insert(err);
            }
        }
        self.manager.clear();
        first_error.map_or(Ok(()), Err)
    }

    /// Full x domain recorded for one series at load time.
    #[must_use]
    pub fn series_full_range(&self, series_id: &str) -> Option<DomainRange> {
        self.series.get(series_id).map(|state| state.full_range)
    }
}
