//! Pan detector: infers canvas navigation from raw wheel, pointer, and key input.
//!
//! The host pans on plain wheel scroll, middle-button drag, and Space+drag.
//! None of those are reported to the overlay directly, so this detector
//! watches the same input and latches "panning" until [`PAN_SETTLE_MS`] after
//! the last signal. Hover-driven note chrome is hidden while it is latched.
//!
//! Timestamps are the caller's event times in milliseconds (DOM
//! `event.timeStamp`); the detector never reads a clock itself.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use crate::consts::PAN_SETTLE_MS;
use crate::input::{Button, Key, Modifiers};

#[derive(Debug, Clone, Default)]
pub struct PanDetector {
    space_held: bool,
    pointer_panning: bool,
    last_signal_ms: Option<f64>,
}

impl PanDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn signal(&mut self, now_ms: f64) {
        self.last_signal_ms = Some(now_ms);
    }

    /// Plain wheel scroll pans; modified wheel (pinch/ctrl zoom) does not.
    pub fn on_wheel(&mut self, modifiers: Modifiers, now_ms: f64) {
        if modifiers.is_empty() {
            self.signal(now_ms);
        }
    }

    /// A middle press, or a primary press with Space held, on the canvas
    /// surface starts a pointer pan.
    pub fn on_pointer_down(&mut self, button: Button, on_canvas: bool, now_ms: f64) {
        if !on_canvas {
            return;
        }
        let pans = match button {
            Button::Middle => true,
            Button::Primary => self.space_held,
            Button::Secondary => false,
        };
        if pans {
            self.pointer_panning = true;
            self.signal(now_ms);
        }
    }

    pub fn on_pointer_move(&mut self, now_ms: f64) {
        if self.pointer_panning {
            self.signal(now_ms);
        }
    }

    pub fn on_pointer_up(&mut self, now_ms: f64) {
        if self.pointer_panning {
            self.pointer_panning = false;
            self.signal(now_ms);
        }
    }

    pub fn on_key_down(&mut self, key: &Key) {
        if key.is_space() {
            self.space_held = true;
        }
    }

    pub fn on_key_up(&mut self, key: &Key) {
        if key.is_space() {
            self.space_held = false;
        }
    }

    #[must_use]
    pub fn space_held(&self) -> bool {
        self.space_held
    }

    /// Whether the canvas counts as panning at `now_ms`.
    #[must_use]
    pub fn is_panning(&self, now_ms: f64) -> bool {
        if self.pointer_panning {
            return true;
        }
        self.last_signal_ms.is_some_and(|last| now_ms - last < PAN_SETTLE_MS)
    }

    /// Forget all state (teardown, or focus loss while Space was held).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
