use serde::{Deserialize, Serialize};

use crate::core::{DomainRange, LinearScale};
use crate::error::{ChartError, ChartResult};

/// X-axis window of a chart: the full data domain plus the currently visible
/// sub-range driven by pan and zoom.
///
/// The visible range is never clamped to the full range so users can pan past
/// the data edges; LOD selection clamps the resulting visible ratio instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainWindow {
    full: DomainRange,
    visible: DomainRange,
}

impl DomainWindow {
    /// Creates a window with matching full and visible ranges.
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        let full = normalize_range(start, end, 1.0)?;
        Ok(Self {
            full,
            visible: full,
        })
    }

    #[must_use]
    pub fn full_range(self) -> DomainRange {
        self.full
    }

    #[must_use]
    pub fn visible_range(self) -> DomainRange {
        self.visible
    }

    /// Replaces the full range and resets the visible range to it.
    pub fn set_full_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.full = normalize_range(start, end, 1.0)?;
        self.visible = self.full;
        Ok(())
    }

    /// Extends the full range so it also covers `other`.
    pub fn include_range(&mut self, other: DomainRange) -> ChartResult<()> {
        let (lo, hi) = other.ordered();
        let start = self.full.min.min(lo);
        let end = self.full.max.max(hi);
        self.full = normalize_range(start, end, 1.0)?;
        Ok(())
    }

    /// Overrides the visible range without modifying the full range.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.visible = normalize_range(start, end, 1e-9)?;
        Ok(())
    }

    pub fn reset_visible_range(&mut self) {
        self.visible = self.full;
    }

    /// Pans the visible range by an additive domain delta.
    pub fn pan_by_delta(&mut self, delta: f64) -> ChartResult<()> {
        if !delta.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }

        self.visible = DomainRange::new(self.visible.min + delta, self.visible.max + delta);
        Ok(())
    }

    /// Zooms the visible range around an anchor value.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out. The resulting
    /// span never drops below `min_span`.
    pub fn zoom_by_factor(&mut self, factor: f64, anchor: f64, min_span: f64) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom min span must be finite and > 0".to_owned(),
            ));
        }

        let current_span = self.visible.span();
        let target_span = (current_span / factor).max(min_span);
        let left_ratio = (anchor - self.visible.min) / current_span;

        let new_start = anchor - left_ratio * target_span;
        self.set_visible_range(new_start, new_start + target_span)
    }

    /// Pixel mapping for the visible range over `width_px` pixels.
    pub fn visible_scale(self, width_px: f64) -> ChartResult<LinearScale> {
        LinearScale::new(self.visible, width_px)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<DomainRange> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "domain range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok(DomainRange::new(start - half, end + half));
    }

    Ok(DomainRange::new(start.min(end), start.max(end)))
}
