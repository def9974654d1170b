//! Resize controller: eight handles, minimum size clamping, and edge proximity.
//!
//! Corner handles show whenever the note is hovered. Edge handles only show
//! when the pointer is within [`EDGE_PROXIMITY_PX`] of that side, so the
//! note body stays clickable. Dragging a west/north side moves the origin and
//! shrinks the size by the same amount; east/south sides only change size.
//! Clamping to [`MIN_WIDTH`] x [`MIN_HEIGHT`] keeps the opposite side fixed.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::camera::{Point, Rect};
use crate::consts::{EDGE_PROXIMITY_PX, MIN_HEIGHT, MIN_WIDTH};
use crate::scene::{Element, ElementPatch};

/// Resize handle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const CORNERS: [Self; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];
    pub const EDGES: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown over this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Position and size in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn of(element: &Element) -> Self {
        Self { x: element.x, y: element.y, width: element.width, height: element.height }
    }

    fn into_patch(self) -> ElementPatch {
        ElementPatch {
            x: Some(self.x),
            y: Some(self.y),
            width: Some(self.width),
            height: Some(self.height),
            ..Default::default()
        }
    }
}

/// Apply a scene-space pointer delta to `start` through `handle`, then clamp.
#[must_use]
pub fn resize_geometry(handle: ResizeHandle, start: Geometry, dx: f64, dy: f64) -> Geometry {
    let mut g = start;

    if handle.moves_west() {
        g.x = start.x + dx;
        g.width = start.width - dx;
    } else if handle.moves_east() {
        g.width = start.width + dx;
    }
    if handle.moves_north() {
        g.y = start.y + dy;
        g.height = start.height - dy;
    } else if handle.moves_south() {
        g.height = start.height + dy;
    }

    if g.width < MIN_WIDTH {
        if handle.moves_west() {
            g.x = start.x + start.width - MIN_WIDTH;
        }
        g.width = MIN_WIDTH;
    }
    if g.height < MIN_HEIGHT {
        if handle.moves_north() {
            g.y = start.y + start.height - MIN_HEIGHT;
        }
        g.height = MIN_HEIGHT;
    }
    g
}

/// Which sides of a note the pointer is near.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeProximity {
    pub n: bool,
    pub e: bool,
    pub s: bool,
    pub w: bool,
}

impl EdgeProximity {
    #[must_use]
    pub fn near(self, handle: ResizeHandle) -> bool {
        match handle {
            ResizeHandle::N => self.n,
            ResizeHandle::E => self.e,
            ResizeHandle::S => self.s,
            ResizeHandle::W => self.w,
            _ => false,
        }
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.n || self.e || self.s || self.w
    }
}

/// Proximity of a screen-space pointer to each side of a screen-space rect.
#[must_use]
pub fn edge_proximity(screen_pt: Point, rect: &Rect, threshold: f64) -> EdgeProximity {
    let local = rect.to_local(screen_pt);
    let in_band_x = local.x >= -threshold && local.x <= rect.width + threshold;
    let in_band_y = local.y >= -threshold && local.y <= rect.height + threshold;
    if !(in_band_x && in_band_y) {
        return EdgeProximity::default();
    }
    EdgeProximity {
        n: local.y.abs() <= threshold,
        e: (local.x - rect.width).abs() <= threshold,
        s: (local.y - rect.height).abs() <= threshold,
        w: local.x.abs() <= threshold,
    }
}

#[derive(Debug, Clone, Copy)]
struct ResizeSession {
    handle: ResizeHandle,
    start_mouse: Point,
    start: Geometry,
}

/// Resize state machine plus hover proximity for one note.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
    proximity: EdgeProximity,
}

impl ResizeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<ResizeHandle> {
        self.session.map(|s| s.handle)
    }

    #[must_use]
    pub fn proximity(&self) -> EdgeProximity {
        self.proximity
    }

    /// Start a resize from `handle`. Ignored while editing.
    pub fn press(&mut self, handle: ResizeHandle, screen_pt: Point, element: &Element, editing: bool) -> bool {
        if editing {
            return false;
        }
        self.session = Some(ResizeSession { handle, start_mouse: screen_pt, start: Geometry::of(element) });
        true
    }

    /// Feed a pointer motion; returns the new geometry as a patch.
    pub fn motion(&mut self, screen_pt: Point, zoom: f64) -> Option<ElementPatch> {
        let session = self.session?;
        let dx = (screen_pt.x - session.start_mouse.x) / zoom;
        let dy = (screen_pt.y - session.start_mouse.y) / zoom;
        Some(resize_geometry(session.handle, session.start, dx, dy).into_patch())
    }

    /// End the session. Returns whether one was active.
    pub fn release(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Recompute edge proximity for a hovering pointer. Skipped (keeping the
    /// last value) while editing or resizing.
    pub fn update_proximity(&mut self, screen_pt: Point, rect: &Rect, editing: bool) -> EdgeProximity {
        if !editing && !self.is_resizing() {
            self.proximity = edge_proximity(screen_pt, rect, EDGE_PROXIMITY_PX);
        }
        self.proximity
    }

    /// Forget proximity, e.g. when the pointer leaves the note.
    pub fn clear_proximity(&mut self) {
        self.proximity = EdgeProximity::default();
    }

    /// Handles to draw: corners while hovered, edges only when near.
    #[must_use]
    pub fn visible_handles(&self, hovered: bool) -> Vec<ResizeHandle> {
        let mut handles = Vec::new();
        if hovered {
            handles.extend(ResizeHandle::CORNERS);
        }
        handles.extend(ResizeHandle::EDGES.into_iter().filter(|h| self.proximity.near(*h)));
        handles
    }
}
