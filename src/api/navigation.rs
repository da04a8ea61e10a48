use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::extensions::LodEvent;
use crate::render::Renderer;

use super::{LevelSwitch, LodChart};

impl<R: Renderer> LodChart<R> {
    /// Sets the visible x window and reselects levels.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<Vec<LevelSwitch>> {
        self.window.set_visible_range(start, end)?;
        self.visible_range_changed()
    }

    /// Shows the full domain again.
    pub fn reset_visible_range(&mut self) -> ChartResult<Vec<LevelSwitch>> {
        self.window.reset_visible_range();
        self.visible_range_changed()
    }

    /// Pans by a horizontal pixel distance; positive values reveal data to the
    /// left, matching a rightward drag.
    pub fn pan_by_pixels(&mut self, delta_px: f64) -> ChartResult<Vec<LevelSwitch>> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        let scale = self.window.visible_scale(f64::from(self.viewport.width))?;
        self.window.pan_by_delta(-scale.pixels_to_domain_delta(delta_px))?;
        self.visible_range_changed()
    }

    /// Zooms around the domain value under `anchor_px`.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out.
    pub fn zoom_around_pixel(
        &mut self,
        factor: f64,
        anchor_px: f64,
    ) -> ChartResult<Vec<LevelSwitch>> {
        let scale = self.window.visible_scale(f64::from(self.viewport.width))?;
        let anchor = scale.pixel_to_domain(anchor_px)?;
        self.window
            .zoom_by_factor(factor, anchor, self.zoom_min_span)?;
        self.visible_range_changed()
    }

    /// Updates the viewport; the pixel budget follows the new width.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<Vec<LevelSwitch>> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        trace!(width = viewport.width, height = viewport.height, "resize viewport");
        self.viewport = viewport;
        self.refresh_levels()
    }

    pub fn pan_start(&mut self, pointer_x: f64) {
        self.interaction.on_pan_start(pointer_x);
    }

    /// Continues a drag started with [`Self::pan_start`]; a no-op when idle.
    pub fn pan_move(&mut self, pointer_x: f64) -> ChartResult<Vec<LevelSwitch>> {
        match self.interaction.on_pan_move(pointer_x) {
            Some(delta_px) if delta_px != 0.0 => self.pan_by_pixels(delta_px),
            _ => Ok(Vec::new()),
        }
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    fn visible_range_changed(&mut self) -> ChartResult<Vec<LevelSwitch>> {
        let range = self.window.visible_range();
        trace!(min = range.min, max = range.max, "visible range changed");
        self.emit_event(LodEvent::VisibleRangeChanged { range });
        self.refresh_levels()
    }
}
