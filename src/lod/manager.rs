use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{DomainRange, PointBuffer};
use crate::error::{ChartError, ChartResult};

use super::{DecimationStrategy, LevelTable, LodConfig, LodLevel};

/// Per-chart cache of level tables keyed by series id.
///
/// Generation is the only expensive operation and is meant to run once per
/// data load; [`LodManager::select`] is `O(levels)` and safe to call on every
/// pan/zoom frame. The manager knows nothing about which level a renderer
/// currently holds.
#[derive(Debug, Clone)]
pub struct LodManager {
    config: LodConfig,
    tables: IndexMap<String, LevelTable>,
}

impl LodManager {
    pub fn new(config: LodConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tables: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Builds levels for an x-ordered series with LTTB.
    pub fn generate(&mut self, series_id: impl Into<String>, buffer: PointBuffer) -> &LevelTable {
        self.generate_with(series_id, buffer, DecimationStrategy::Lttb)
    }

    /// Builds levels for unordered scatter data with grid sampling.
    pub fn generate_scatter(
        &mut self,
        series_id: impl Into<String>,
        buffer: PointBuffer,
    ) -> &LevelTable {
        self.generate_with(series_id, buffer, DecimationStrategy::SpatialGrid)
    }

    /// Builds levels with an explicit strategy, replacing any previous table
    /// for the same series.
    pub fn generate_with(
        &mut self,
        series_id: impl Into<String>,
        buffer: PointBuffer,
        strategy: DecimationStrategy,
    ) -> &LevelTable {
        let series_id = series_id.into();
        let source_count = buffer.point_count();
        let table = build_level_table(buffer, strategy, &self.config);
        debug!(
            series_id = %series_id,
            strategy = strategy.name(),
            source_count,
            levels = table.len(),
            coarsest_count = table.coarsest().point_count(),
            "generated lod levels"
        );
        self.insert_table(series_id, table)
    }

    /// Stores a table built elsewhere, e.g. by [`build_level_table`] on a
    /// host worker thread.
    pub fn insert_table(&mut self, series_id: impl Into<String>, table: LevelTable) -> &LevelTable {
        match self.tables.entry(series_id.into()) {
            Entry::Occupied(mut entry) => {
                entry.insert(table);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(table),
        }
    }

    /// Picks the finest level whose estimated visible point count fits the
    /// pixel budget, falling back to the coarsest level.
    ///
    /// Calling this before levels were generated for `series_id` is an
    /// integration bug and returns [`ChartError::MissingLevels`].
    pub fn select(
        &self,
        series_id: &str,
        viewport_width_px: f64,
        visible_range: DomainRange,
        full_range: DomainRange,
    ) -> ChartResult<&LodLevel> {
        let Some(table) = self.tables.get(series_id) else {
            warn!(series_id, "lod selection requested before levels were generated");
            return Err(ChartError::MissingLevels {
                series_id: series_id.to_owned(),
            });
        };

        let visible_ratio = visible_range.ratio_of(full_range);
        let budget = visible_point_budget(viewport_width_px, self.config.max_points_per_pixel);
        let selected = select_level(table, visible_ratio, budget);
        trace!(
            series_id,
            visible_ratio,
            budget,
            level = selected.level(),
            point_count = selected.point_count(),
            "selected lod level"
        );
        Ok(selected)
    }

    #[must_use]
    pub fn get_levels(&self, series_id: &str) -> Option<&LevelTable> {
        self.tables.get(series_id)
    }

    #[must_use]
    pub fn has_levels(&self, series_id: &str) -> bool {
        self.tables.contains_key(series_id)
    }

    /// Drops the table of one series. Returns whether it existed.
    pub fn remove(&mut self, series_id: &str) -> bool {
        let removed = self.tables.shift_remove(series_id).is_some();
        if removed {
            debug!(series_id, "removed lod levels");
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!(series_count = self.tables.len(), "cleared lod levels");
        self.tables.clear();
    }

    /// Series ids in generation order.
    pub fn series_ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Aggregate buffer usage across all tables. Diagnostic only.
    #[must_use]
    pub fn memory_usage(&self) -> LodMemoryUsage {
        LodMemoryUsage {
            series_count: self.tables.len(),
            total_bytes: self.tables.values().map(LevelTable::total_bytes).sum(),
            per_level_counts: self
                .tables
                .iter()
                .map(|(series_id, table)| (series_id.clone(), table.point_counts()))
                .collect(),
        }
    }
}

/// Memory snapshot returned by [`LodManager::memory_usage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LodMemoryUsage {
    pub series_count: usize,
    pub total_bytes: usize,
    /// Point count of every level, keyed by series id.
    pub per_level_counts: IndexMap<String, Vec<usize>>,
}

impl LodMemoryUsage {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize lod memory usage: {e}"))
        })
    }
}

/// Builds the full level ladder for one series.
///
/// Level 0 aliases `buffer`. Each configured target smaller than the current
/// coarsest count decimates that coarsest level; other targets are skipped.
/// Series below `min_points_for_lod` keep only level 0.
#[must_use]
pub fn build_level_table(
    buffer: PointBuffer,
    strategy: DecimationStrategy,
    config: &LodConfig,
) -> LevelTable {
    let source_count = buffer.point_count();
    let mut table = LevelTable::new(buffer, strategy);
    if source_count < config.min_points_for_lod {
        return table;
    }

    for &target in &config.target_levels {
        let current = table.coarsest();
        if target >= current.point_count() {
            continue;
        }
        let decimated = strategy.decimate(current.data(), target);
        if decimated.point_count() >= current.point_count() {
            continue;
        }
        trace!(
            target,
            point_count = decimated.point_count(),
            level = table.len(),
            "decimated lod level"
        );
        table.push(decimated);
    }

    table
}

fn visible_point_budget(viewport_width_px: f64, max_points_per_pixel: f64) -> f64 {
    if viewport_width_px.is_finite() && viewport_width_px > 0.0 {
        viewport_width_px * max_points_per_pixel
    } else {
        0.0
    }
}

fn select_level(table: &LevelTable, visible_ratio: f64, budget: f64) -> &LodLevel {
    if table.len() == 1 {
        return table.finest();
    }

    table
        .levels()
        .iter()
        .find(|level| level.point_count() as f64 * visible_ratio <= budget)
        .unwrap_or_else(|| table.coarsest())
}
