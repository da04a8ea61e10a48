//! Chart-side integration of the LOD engine.
//!
//! [`LodChart`] owns one [`LodManager`], the rendering pipeline handle and the
//! current-level record of every series. Each domain or viewport change runs
//! level selection and re-uploads only series whose level changed.

mod chart_config;
mod level_selection;
mod navigation;
mod observer_registry;
mod series_controller;
mod spatial_index;

pub use chart_config::LodChartConfig;
pub use level_selection::LevelSwitch;
pub use spatial_index::SpatialIndex;

use indexmap::IndexMap;

use crate::core::{DomainRange, DomainWindow, Viewport};
use crate::error::ChartResult;
use crate::extensions::LodObserver;
use crate::interaction::{InteractionMode, InteractionState};
use crate::lod::{LevelTable, LodManager, LodMemoryUsage};
use crate::render::Renderer;

/// Per-series chart state. The uploaded level lives here, not in the manager.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeriesState {
    full_range: DomainRange,
    current_level: Option<usize>,
}

pub struct LodChart<R: Renderer> {
    renderer: R,
    viewport: Viewport,
    window: DomainWindow,
    manager: LodManager,
    series: IndexMap<String, SeriesState>,
    interaction: InteractionState,
    zoom_min_span: f64,
    fit_domain_on_load: bool,
    spatial_index: Option<Box<dyn SpatialIndex>>,
    observers: Vec<Box<dyn LodObserver>>,
}

impl<R: Renderer> LodChart<R> {
    pub fn new(renderer: R, config: LodChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let window = DomainWindow::new(config.domain_start, config.domain_end)?;
        let manager = LodManager::new(config.lod)?;

        Ok(Self {
            renderer,
            viewport: config.viewport,
            window,
            manager,
            series: IndexMap::new(),
            interaction: InteractionState::default(),
            zoom_min_span: config.zoom_min_span,
            fit_domain_on_load: config.fit_domain_on_load,
            spatial_index: None,
            observers: Vec::new(),
        })
    }

    /// Attaches the hit-testing collaborator and feeds it every loaded series.
    pub fn set_spatial_index(&mut self, mut index: Box<dyn SpatialIndex>) {
        for series_id in self.series.keys() {
            if let Some(table) = self.manager.get_levels(series_id) {
                index.rebuild(series_id, table.original());
            }
        }
        self.spatial_index = Some(index);
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn visible_range(&self) -> DomainRange {
        self.window.visible_range()
    }

    #[must_use]
    pub fn full_range(&self) -> DomainRange {
        self.window.full_range()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Level index currently uploaded for `series_id`.
    #[must_use]
    pub fn current_level(&self, series_id: &str) -> Option<usize> {
        self.series
            .get(series_id)
            .and_then(|state| state.current_level)
    }

    #[must_use]
    pub fn levels(&self, series_id: &str) -> Option<&LevelTable> {
        self.manager.get_levels(series_id)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn manager(&self) -> &LodManager {
        &self.manager
    }

    #[must_use]
    pub fn memory_usage(&self) -> LodMemoryUsage {
        self.manager.memory_usage()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
