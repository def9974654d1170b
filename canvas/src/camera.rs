#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::scene::{AppState, Element};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in the same space.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle with an optional rotation about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in radians around the center.
    pub angle: f64,
}

impl Rect {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Map `pt` into this rectangle's unrotated frame, relative to its top-left corner.
    #[must_use]
    pub fn to_local(&self, pt: Point) -> Point {
        let c = self.center();
        let (sin, cos) = (-self.angle).sin_cos();
        let dx = pt.x - c.x;
        let dy = pt.y - c.y;
        Point {
            x: dx * cos - dy * sin + self.width / 2.0,
            y: dx * sin + dy * cos + self.height / 2.0,
        }
    }
}

/// View transform of the host canvas.
///
/// Mirrors the host's convention: `screen = (scene + scroll) * zoom`.
/// `scroll_x` / `scroll_y` are in scene units, `zoom` is a scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scroll_x: 0.0, scroll_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Build a viewport from the host's app state. A non-positive zoom falls back to 1.
    #[must_use]
    pub fn from_app_state(state: &AppState) -> Self {
        let zoom = if state.zoom.value > 0.0 { state.zoom.value } else { 1.0 };
        Self { scroll_x: state.scroll_x, scroll_y: state.scroll_y, zoom }
    }

    /// Convert a screen-space point (CSS pixels) to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.zoom - self.scroll_x,
            y: screen.y / self.zoom - self.scroll_y,
        }
    }

    /// Convert a scene-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point {
            x: (scene.x + self.scroll_x) * self.zoom,
            y: (scene.y + self.scroll_y) * self.zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to scene-space distance.
    #[must_use]
    pub fn screen_dist_to_scene(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// The element's bounding box in screen space, where the overlay is drawn.
    #[must_use]
    pub fn element_rect(&self, element: &Element) -> Rect {
        let origin = self.scene_to_screen(Point::new(element.x, element.y));
        Rect {
            x: origin.x,
            y: origin.y,
            width: element.width * self.zoom,
            height: element.height * self.zoom,
            angle: element.angle,
        }
    }
}
