//! Rotate controller: pointer angle around the note center drives its angle.
//!
//! `atan2` only covers (-π, π]. Each motion adds the shortest signed step
//! from the previous pointer angle, so crossing the branch cut is smooth and
//! whole turns accumulate instead of snapping back.

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;

use std::f64::consts::PI;

use crate::camera::{Point, Viewport};
use crate::consts::TAU;
use crate::scene::{Element, ElementPatch};

/// Shortest signed angle from `from` to `to`, in (-π, π].
#[must_use]
pub fn signed_angle_delta(to: f64, from: f64) -> f64 {
    let delta = to - from;
    if !delta.is_finite() {
        return 0.0;
    }
    let wrapped = delta.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Angle of `pt` around `center`, or `None` when they coincide.
#[must_use]
pub fn pointer_angle(center: Point, pt: Point) -> Option<f64> {
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return None;
    }
    Some(dy.atan2(dx))
}

#[derive(Debug, Clone, Copy)]
struct RotateSession {
    /// Screen-space pivot.
    center: Point,
    /// Element angle at press time.
    start_angle: f64,
    /// Pointer angle seen on the previous event.
    last_pointer: f64,
    /// Unwrapped pointer rotation since the press.
    swept: f64,
}

/// Rotation state machine for one note.
#[derive(Debug, Clone, Default)]
pub struct RotateController {
    session: Option<RotateSession>,
}

impl RotateController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.session.is_some()
    }

    /// Start rotating around the element's on-screen center. Ignored while
    /// editing or when the press is exactly on the center.
    pub fn press(&mut self, screen_pt: Point, element: &Element, viewport: &Viewport, editing: bool) -> bool {
        if editing {
            return false;
        }
        let center = viewport.element_rect(element).center();
        let Some(initial) = pointer_angle(center, screen_pt) else {
            return false;
        };
        self.session = Some(RotateSession { center, start_angle: element.angle, last_pointer: initial, swept: 0.0 });
        true
    }

    /// Feed a pointer motion; returns the new angle as a patch.
    pub fn motion(&mut self, screen_pt: Point) -> Option<ElementPatch> {
        let session = self.session.as_mut()?;
        let current = pointer_angle(session.center, screen_pt)?;
        session.swept += signed_angle_delta(current, session.last_pointer);
        session.last_pointer = current;
        Some(ElementPatch::angle(session.start_angle + session.swept))
    }

    /// End the session. Returns whether one was active.
    pub fn release(&mut self) -> bool {
        self.session.take().is_some()
    }
}
