use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::lod::LodConfig;

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodChartConfig {
    pub viewport: Viewport,
    pub domain_start: f64,
    pub domain_end: f64,
    /// Smallest visible x span reachable by zooming.
    #[serde(default = "default_zoom_min_span")]
    pub zoom_min_span: f64,
    /// Re-fit the full x domain to loaded series.
    #[serde(default = "default_fit_domain_on_load")]
    pub fit_domain_on_load: bool,
    #[serde(default)]
    pub lod: LodConfig,
}

impl LodChartConfig {
    /// Creates a config with default LOD tuning.
    #[must_use]
    pub fn new(viewport: Viewport, domain_start: f64, domain_end: f64) -> Self {
        Self {
            viewport,
            domain_start,
            domain_end,
            zoom_min_span: default_zoom_min_span(),
            fit_domain_on_load: default_fit_domain_on_load(),
            lod: LodConfig::default(),
        }
    }

    /// Sets LOD manager tuning.
    #[must_use]
    pub fn with_lod_config(mut self, lod: LodConfig) -> Self {
        self.lod = lod;
        self
    }

    /// Sets minimum visible span reachable by zooming.
    #[must_use]
    pub fn with_zoom_min_span(mut self, zoom_min_span: f64) -> Self {
        self.zoom_min_span = zoom_min_span;
        self
    }

    /// Keeps the configured domain instead of fitting it to loaded data.
    #[must_use]
    pub fn with_fit_domain_on_load(mut self, fit: bool) -> Self {
        self.fit_domain_on_load = fit;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.zoom_min_span.is_finite() || self.zoom_min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom min span must be finite and > 0".to_owned(),
            ));
        }
        self.lod.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_zoom_min_span() -> f64 {
    1e-9
}

fn default_fit_domain_on_load() -> bool {
    true
}
