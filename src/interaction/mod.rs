use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Pointer-drag state used to turn pixel movement into domain pans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    last_pointer_x: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            last_pointer_x: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    pub fn on_pan_start(&mut self, pointer_x: f64) {
        self.mode = InteractionMode::Panning;
        self.last_pointer_x = pointer_x;
    }

    /// Returns the horizontal pixel delta since the previous pointer sample,
    /// or `None` when no pan is active.
    pub fn on_pan_move(&mut self, pointer_x: f64) -> Option<f64> {
        if self.mode != InteractionMode::Panning || !pointer_x.is_finite() {
            return None;
        }
        let delta = pointer_x - self.last_pointer_x;
        self.last_pointer_x = pointer_x;
        Some(delta)
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
