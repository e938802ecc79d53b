//! Drag-to-rotate.
//!
//! The controller owns no rotation: it receives the current value and hands
//! back the updated one, so the projection engine stays the only writer of
//! projection state.

use foundation::math::Rotation;
use tracing::trace;

use crate::choropleth::RedrawMode;

/// Drag sensitivity numerator; degrees per pixel is `K / scale`.
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 50.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone)]
pub struct RotationController {
    state: DragState,
    sensitivity: f64,
    has_interacted: bool,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SENSITIVITY)
    }
}

impl RotationController {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            state: DragState::Idle,
            sensitivity,
            has_interacted: false,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Whether any drag has started since construction.
    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    /// Redraws not caused by a drag animate only while idle.
    pub fn redraw_mode(&self) -> RedrawMode {
        match self.state {
            DragState::Idle => RedrawMode::Animated,
            DragState::Dragging => RedrawMode::Instant,
        }
    }

    /// Degrees of rotation per pixel at `scale`.
    pub fn degrees_per_pixel(&self, scale: f64) -> f64 {
        self.sensitivity / scale
    }

    pub fn drag_start(&mut self) {
        self.state = DragState::Dragging;
        self.has_interacted = true;
    }

    /// The rotation after a pointer move of `(dx, dy)` pixels.
    ///
    /// `None` while idle, or when the inputs would produce a non-finite
    /// rotation.
    pub fn drag_move(&self, dx: f64, dy: f64, scale: f64, current: Rotation) -> Option<Rotation> {
        if self.state != DragState::Dragging {
            return None;
        }
        let k = self.degrees_per_pixel(scale);
        let next = current.offset(dx * k, -dy * k);
        trace!(dx, dy, lon = next.longitude, lat = next.latitude, "drag");
        next.is_finite().then_some(next)
    }

    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }
}
