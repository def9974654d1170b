//! Drag controller: turns pointer motion on a note body into position patches.
//!
//! A press only arms the controller. The pointer has to travel more than
//! [`DRAG_THRESHOLD_PX`] (screen space) before the press becomes a drag; until
//! then the gesture is a click and the element never moves. The drag snapshot
//! is taken at the crossing point, so the first movement applied is measured
//! from there rather than from the press.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::camera::Point;
use crate::consts::DRAG_THRESHOLD_PX;
use crate::scene::{Element, ElementPatch};

/// Drag session state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    /// No press in progress.
    #[default]
    Idle,
    /// Pressed but still under the threshold.
    Pending {
        /// Screen-space press position.
        press: Point,
        /// Element position at press time.
        origin_x: f64,
        origin_y: f64,
    },
    /// Threshold crossed; every motion moves the element.
    Dragging {
        /// Screen-space pointer position at the threshold crossing.
        start_mouse: Point,
        /// Element x at the crossing.
        start_x: f64,
        /// Element y at the crossing.
        start_y: f64,
    },
}

/// Result of a pointer motion.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMotion {
    /// Not pressed, or still under the threshold.
    Ignored,
    /// The threshold was crossed on this motion. Nothing moves yet.
    Started,
    /// The element should move to the patched position.
    Moved(ElementPatch),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRelease {
    /// No press was in progress.
    None,
    /// Released under the threshold: a plain click.
    Click,
    /// Released after dragging; the last computed position stands.
    Dropped,
}

/// Drag state machine for one note.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Arm the controller on a body press. Ignored while editing.
    pub fn press(&mut self, screen_pt: Point, element: &Element, editing: bool) -> bool {
        if editing {
            return false;
        }
        self.state = DragState::Pending { press: screen_pt, origin_x: element.x, origin_y: element.y };
        true
    }

    /// Feed a pointer motion. `zoom` converts screen deltas to scene deltas.
    pub fn motion(&mut self, screen_pt: Point, zoom: f64) -> DragMotion {
        match self.state {
            DragState::Idle => DragMotion::Ignored,
            DragState::Pending { press, origin_x, origin_y } => {
                if press.distance(screen_pt) <= DRAG_THRESHOLD_PX {
                    return DragMotion::Ignored;
                }
                self.state = DragState::Dragging { start_mouse: screen_pt, start_x: origin_x, start_y: origin_y };
                DragMotion::Started
            }
            DragState::Dragging { start_mouse, start_x, start_y } => {
                let dx = (screen_pt.x - start_mouse.x) / zoom;
                let dy = (screen_pt.y - start_mouse.y) / zoom;
                DragMotion::Moved(ElementPatch::position(start_x + dx, start_y + dy))
            }
        }
    }

    /// End the session.
    pub fn release(&mut self) -> DragRelease {
        let outcome = match self.state {
            DragState::Idle => DragRelease::None,
            DragState::Pending { .. } => DragRelease::Click,
            DragState::Dragging { .. } => DragRelease::Dropped,
        };
        self.state = DragState::Idle;
        outcome
    }

    /// Drop the session without reporting an outcome.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
