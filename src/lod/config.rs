use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Immutable LOD manager configuration.
///
/// Serializable so hosts can keep LOD tuning next to the rest of their chart
/// setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodConfig {
    /// Strictly descending point-count targets, one per generated level.
    #[serde(default = "default_target_levels")]
    pub target_levels: Vec<usize>,
    /// Series with fewer points keep only level 0.
    #[serde(default = "default_min_points_for_lod")]
    pub min_points_for_lod: usize,
    /// Visible points allowed per horizontal pixel before a coarser level is used.
    #[serde(default = "default_max_points_per_pixel")]
    pub max_points_per_pixel: f64,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            target_levels: default_target_levels(),
            min_points_for_lod: default_min_points_for_lod(),
            max_points_per_pixel: default_max_points_per_pixel(),
        }
    }
}

impl LodConfig {
    #[must_use]
    pub fn with_target_levels(mut self, target_levels: impl Into<Vec<usize>>) -> Self {
        self.target_levels = target_levels.into();
        self
    }

    #[must_use]
    pub fn with_min_points_for_lod(mut self, min_points_for_lod: usize) -> Self {
        self.min_points_for_lod = min_points_for_lod;
        self
    }

    #[must_use]
    pub fn with_max_points_per_pixel(mut self, max_points_per_pixel: f64) -> Self {
        self.max_points_per_pixel = max_points_per_pixel;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.target_levels.is_empty() {
            return Err(ChartError::InvalidConfig(
                "target levels must not be empty".to_owned(),
            ));
        }
        if let Some(&target) = self.target_levels.iter().find(|&&target| target < 2) {
            return Err(ChartError::InvalidConfig(format!(
                "target level {target} must keep at least 2 points"
            )));
        }
        if self.target_levels.windows(2).any(|pair| pair[1] >= pair[0]) {
            return Err(ChartError::InvalidConfig(
                "target levels must be strictly descending".to_owned(),
            ));
        }
        if !self.max_points_per_pixel.is_finite() || self.max_points_per_pixel <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "max points per pixel must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize lod config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse lod config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_target_levels() -> Vec<usize> {
    vec![500_000, 100_000, 50_000, 10_000, 5_000]
}

fn default_min_points_for_lod() -> usize {
    100_000
}

fn default_max_points_per_pixel() -> f64 {
    4.0
}
