//! Shared numeric constants for the canvas crate.

// ── Drag ────────────────────────────────────────────────────────

/// Screen-space distance the pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

// ── Resize ──────────────────────────────────────────────────────

/// Smallest width a note can be resized to, in scene units.
pub const MIN_WIDTH: f64 = 100.0;

/// Smallest height a note can be resized to, in scene units.
pub const MIN_HEIGHT: f64 = 80.0;

/// Screen-space distance from a side within which its edge handle is revealed.
pub const EDGE_PROXIMITY_PX: f64 = 12.0;

// ── Pan ─────────────────────────────────────────────────────────

/// How long panning stays latched after the last wheel or pan-drag signal.
pub const PAN_SETTLE_MS: f64 = 150.0;

// ── Scene ───────────────────────────────────────────────────────

/// `customData.type` marker identifying markdown note elements.
pub const MARKDOWN_NOTE_TYPE: &str = "markdown-note";

/// Default size for a freshly created note, in scene units.
pub const DEFAULT_NOTE_WIDTH: f64 = 320.0;

/// Default height for a freshly created note, in scene units.
pub const DEFAULT_NOTE_HEIGHT: f64 = 200.0;

/// One full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;
