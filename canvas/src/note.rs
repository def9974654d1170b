//! One markdown note overlay: gesture controllers plus edit state.
//!
//! A note owns its drag, resize, and rotate controllers and makes sure only
//! one of them has a session at a time. It keeps a local draft of the
//! content while editing and writes it back to the host only when editing
//! ends with a change. Geometry changes are written on every pointer motion.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use crate::camera::{Point, Viewport};
use crate::drag::{DragController, DragMotion, DragRelease};
use crate::engine::Action;
use crate::input::{Button, Key, NotePart};
use crate::markdown::{export_file_name, toggle_task};
use crate::resize::{ResizeController, ResizeHandle};
use crate::rotate::RotateController;
use crate::scene::{Element, ElementId, ElementPatch, SceneHost, find_element, update_element};

/// Which gesture currently owns the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Drag,
    Resize,
    Rotate,
}

/// Outcome of a pointer release for this note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The note had no gesture.
    None,
    /// A body press that never became a drag.
    Click,
    /// A drag, resize, or rotate finished.
    Finished,
}

#[derive(Debug, Clone)]
pub struct MarkdownNote {
    id: ElementId,
    editing: bool,
    /// Working copy shown in the editor and renderer.
    content: String,
    /// Last content known to be in the host scene.
    saved: String,
    hovered: bool,
    drag: DragController,
    resize: ResizeController,
    rotate: RotateController,
}

impl MarkdownNote {
    #[must_use]
    pub fn new(element: &Element) -> Self {
        Self {
            id: element.id.clone(),
            editing: false,
            content: element.content().to_owned(),
            saved: element.content().to_owned(),
            hovered: false,
            drag: DragController::new(),
            resize: ResizeController::new(),
            rotate: RotateController::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        if self.drag.is_active() {
            Gesture::Drag
        } else if self.resize.is_resizing() {
            Gesture::Resize
        } else if self.rotate.is_rotating() {
            Gesture::Rotate
        } else {
            Gesture::Idle
        }
    }

    /// Take the host's latest copy of the element. The draft wins while editing.
    pub fn sync(&mut self, element: &Element) {
        self.saved = element.content().to_owned();
        if !self.editing {
            self.content.clone_from(&self.saved);
        }
    }

    // --- Pointer ---

    /// Start a gesture on `part`. Ignored for non-primary buttons, while
    /// editing, while another gesture is active, or when the element is gone.
    pub fn pointer_down(&mut self, host: &dyn SceneHost, part: NotePart, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.editing || self.gesture() != Gesture::Idle {
            return Vec::new();
        }
        let Some(element) = find_element(host, &self.id) else {
            return Vec::new();
        };
        match part {
            NotePart::Body => {
                self.drag.press(screen_pt, &element, self.editing);
                Vec::new()
            }
            NotePart::ResizeHandle(handle) => {
                if self.resize.press(handle, screen_pt, &element, self.editing) {
                    vec![Action::SetCursor(handle.cursor().to_owned())]
                } else {
                    Vec::new()
                }
            }
            NotePart::RotateHandle => {
                let viewport = Viewport::from_app_state(&host.app_state());
                if self.rotate.press(screen_pt, &element, &viewport, self.editing) {
                    vec![Action::SetCursor("grabbing".into())]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Feed a window-level pointer motion to the active gesture.
    pub fn pointer_move(&mut self, host: &mut dyn SceneHost, screen_pt: Point) -> Vec<Action> {
        let patch = match self.gesture() {
            Gesture::Idle => return Vec::new(),
            Gesture::Drag => {
                let zoom = Viewport::from_app_state(&host.app_state()).zoom;
                match self.drag.motion(screen_pt, zoom) {
                    DragMotion::Ignored => return Vec::new(),
                    DragMotion::Started => return vec![Action::SetCursor("grabbing".into())],
                    DragMotion::Moved(patch) => Some(patch),
                }
            }
            Gesture::Resize => {
                let zoom = Viewport::from_app_state(&host.app_state()).zoom;
                self.resize.motion(screen_pt, zoom)
            }
            Gesture::Rotate => self.rotate.motion(screen_pt),
        };
        match patch {
            Some(patch) => self.write(host, patch).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// End whichever gesture is active.
    pub fn pointer_up(&mut self) -> Release {
        match self.gesture() {
            Gesture::Idle => Release::None,
            Gesture::Drag => match self.drag.release() {
                DragRelease::Click => Release::Click,
                DragRelease::Dropped => Release::Finished,
                DragRelease::None => Release::None,
            },
            Gesture::Resize => {
                self.resize.release();
                Release::Finished
            }
            Gesture::Rotate => {
                self.rotate.release();
                Release::Finished
            }
        }
    }

    /// Drop any gesture without committing anything further (unmount).
    pub fn cancel_gestures(&mut self) {
        self.drag.cancel();
        self.resize.release();
        self.rotate.release();
    }

    // --- Hover ---

    /// Pointer over the note. Hover chrome is suppressed while the canvas pans.
    pub fn hover(&mut self, host: &dyn SceneHost, screen_pt: Point, panning: bool) -> Vec<Action> {
        let was_hovered = self.hovered;
        let before = self.resize.proximity();
        if panning {
            self.hover_leave();
        } else if let Some(element) = find_element(host, &self.id) {
            self.hovered = true;
            let rect = Viewport::from_app_state(&host.app_state()).element_rect(&element);
            self.resize.update_proximity(screen_pt, &rect, self.editing);
        }
        if was_hovered != self.hovered || before != self.resize.proximity() {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn hover_leave(&mut self) {
        self.hovered = false;
        if !self.resize.is_resizing() {
            self.resize.clear_proximity();
        }
    }

    /// Resize handles to draw right now. None while editing.
    #[must_use]
    pub fn visible_handles(&self) -> Vec<ResizeHandle> {
        if self.editing {
            return Vec::new();
        }
        self.resize.visible_handles(self.hovered)
    }

    // --- Editing ---

    pub fn begin_edit(&mut self) -> Vec<Action> {
        if self.editing || self.gesture() != Gesture::Idle {
            return Vec::new();
        }
        self.editing = true;
        vec![Action::EditStarted { id: self.id.clone() }]
    }

    /// Replace the draft. Ignored unless editing.
    pub fn edit(&mut self, text: &str) {
        if self.editing {
            text.clone_into(&mut self.content);
        }
    }

    /// Leave edit mode, persisting the draft only if it changed.
    pub fn blur(&mut self, host: &mut dyn SceneHost) -> Vec<Action> {
        if !self.editing {
            return Vec::new();
        }
        self.editing = false;
        let mut actions = Vec::new();
        let saved = if self.content == self.saved {
            false
        } else {
            let persisted = self.write(host, ElementPatch::content(self.content.clone()));
            let ok = persisted.is_some();
            actions.extend(persisted);
            ok
        };
        actions.push(Action::EditEnded { id: self.id.clone(), saved });
        actions
    }

    /// Escape ends editing the same way blur does.
    pub fn key_down(&mut self, host: &mut dyn SceneHost, key: &Key) -> Vec<Action> {
        if self.editing && key.is_escape() { self.blur(host) } else { Vec::new() }
    }

    /// Set the checkbox on `line` and persist immediately. Ignored while editing.
    pub fn toggle_checkbox(&mut self, host: &mut dyn SceneHost, line: usize, checked: bool) -> Vec<Action> {
        if self.editing {
            return Vec::new();
        }
        let Some(next) = toggle_task(&self.content, line, checked) else {
            tracing::debug!(id = %self.id, line, "no checkbox on line");
            return Vec::new();
        };
        if next == self.content {
            return Vec::new();
        }
        self.content = next;
        self.write(host, ElementPatch::content(self.content.clone())).into_iter().collect()
    }

    /// Ask the host to capture this note as a PNG.
    #[must_use]
    pub fn export_png(&self) -> Action {
        Action::ExportRequested { id: self.id.clone(), file_name: export_file_name(&self.content) }
    }

    fn write(&mut self, host: &mut dyn SceneHost, patch: ElementPatch) -> Option<Action> {
        if !update_element(host, &self.id, &patch) {
            return None;
        }
        if let Some(ref content) = patch.content {
            self.saved.clone_from(content);
        }
        Some(Action::ElementUpdated { id: self.id.clone(), patch })
    }
}
