//! Note engine: the app-root owner of every mounted note overlay.
//!
//! The host forwards DOM input here and applies the returned [`Action`]s
//! (cursor changes, re-render requests, selection and export events). Scene
//! mutations go straight through the injected [`SceneHost`]; the matching
//! `ElementUpdated` actions are informational.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::consts::{DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_WIDTH};
use crate::input::{Button, Key, Modifiers, NotePart, WheelDelta};
use crate::note::{Gesture, MarkdownNote, Release};
use crate::pan::PanDetector;
use crate::scene::{Element, ElementId, ElementPatch, SceneHost, append_element, new_element_id};
use crate::selection::SelectionStore;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The element was patched in the host scene.
    ElementUpdated { id: ElementId, patch: ElementPatch },
    /// `markdown-note:select`.
    NoteSelected { id: ElementId },
    /// `markdown-note:deselect`.
    NoteDeselected { id: ElementId },
    EditStarted { id: ElementId },
    /// Editing ended; `saved` is true when new content was written.
    EditEnded { id: ElementId, saved: bool },
    /// Capture the note overlay as a PNG under `file_name`.
    ExportRequested { id: ElementId, file_name: String },
    SetCursor(String),
    RenderNeeded,
}

#[derive(Debug, Default)]
pub struct NoteEngine {
    notes: HashMap<ElementId, MarkdownNote>,
    selection: SelectionStore,
    pan: PanDetector,
}

impl NoteEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Reconcile mounted notes with the host scene: mount new notes, refresh
    /// existing ones, and unmount notes whose elements are gone. When the
    /// scene cannot be read nothing is reconciled.
    pub fn sync(&mut self, host: &dyn SceneHost) -> Vec<Action> {
        let elements: Vec<_> = match host.scene_elements() {
            Ok(elements) => elements.into_iter().filter(|e| e.is_markdown_note()).collect(),
            Err(e) => {
                tracing::error!(error = %e, mounted = self.notes.len(), "sync skipped: scene unreadable");
                return Vec::new();
            }
        };

        let mut actions = Vec::new();
        let gone: Vec<ElementId> = self
            .notes
            .keys()
            .filter(|id| !elements.iter().any(|e| &e.id == *id))
            .cloned()
            .collect();
        for id in gone {
            actions.extend(self.unmount(&id));
        }

        for element in &elements {
            match self.notes.get_mut(&element.id) {
                Some(note) => note.sync(element),
                None => {
                    tracing::debug!(id = %element.id, "mounting note");
                    self.notes.insert(element.id.clone(), MarkdownNote::new(element));
                }
            }
        }
        actions
    }

    /// Add a default-sized note centered on `center` (scene coordinates),
    /// mount it, and select it. `None` when the scene cannot be read, in which
    /// case nothing is written or mounted.
    pub fn create_note(&mut self, host: &mut dyn SceneHost, center: Point, content: &str) -> Option<(ElementId, Vec<Action>)> {
        let id = new_element_id();
        let element = Element::note(
            id.clone(),
            center.x - DEFAULT_NOTE_WIDTH / 2.0,
            center.y - DEFAULT_NOTE_HEIGHT / 2.0,
            DEFAULT_NOTE_WIDTH,
            DEFAULT_NOTE_HEIGHT,
            content,
        );
        let note = MarkdownNote::new(&element);
        if !append_element(host, element) {
            return None;
        }
        self.notes.insert(id.clone(), note);
        let actions = self.selection.select(host, &id);
        Some((id, actions))
    }

    /// Drop one note, ending its gestures and selection.
    pub fn unmount(&mut self, id: &str) -> Vec<Action> {
        let Some(mut note) = self.notes.remove(id) else {
            return Vec::new();
        };
        note.cancel_gestures();
        self.selection.deselect_if(id)
    }

    /// Drop everything (app teardown). Selection is reset silently.
    pub fn teardown(&mut self) {
        for note in self.notes.values_mut() {
            note.cancel_gestures();
        }
        self.notes.clear();
        self.selection.reset();
        self.pan.reset();
    }

    // --- Queries ---

    #[must_use]
    pub fn note(&self, id: &str) -> Option<&MarkdownNote> {
        self.notes.get(id)
    }

    /// Mounted note ids, sorted.
    #[must_use]
    pub fn note_ids(&self) -> Vec<&ElementId> {
        let mut ids: Vec<_> = self.notes.keys().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.selected()
    }

    #[must_use]
    pub fn is_panning(&self, now_ms: f64) -> bool {
        self.pan.is_panning(now_ms)
    }

    // --- Pointer input ---

    /// Press on part of a note overlay.
    pub fn on_note_pointer_down(
        &mut self,
        host: &dyn SceneHost,
        id: &str,
        part: NotePart,
        screen_pt: Point,
        button: Button,
        now_ms: f64,
    ) -> Vec<Action> {
        // Space+drag and middle-drag pan the canvas even when they start on a note.
        if button == Button::Middle || (button == Button::Primary && self.pan.space_held()) {
            self.pan.on_pointer_down(button, true, now_ms);
            return Vec::new();
        }
        let Some(note) = self.notes.get_mut(id) else {
            return Vec::new();
        };
        note.pointer_down(host, part, screen_pt, button)
    }

    /// Capture-phase press anywhere in the document. `target_note` is the
    /// closest `[data-note-id]` ancestor of the target.
    pub fn on_document_pointer_down(
        &mut self,
        target_note: Option<&str>,
        button: Button,
        on_canvas: bool,
        now_ms: f64,
    ) -> Vec<Action> {
        if target_note.is_none() {
            self.pan.on_pointer_down(button, on_canvas, now_ms);
        }
        self.selection.on_document_pointer_down(target_note)
    }

    /// Window-level pointer motion: drives every active gesture session.
    pub fn on_pointer_move(&mut self, host: &mut dyn SceneHost, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        self.pan.on_pointer_move(now_ms);
        let mut actions = Vec::new();
        for note in self.notes.values_mut() {
            if note.gesture() != Gesture::Idle {
                actions.extend(note.pointer_move(host, screen_pt));
            }
        }
        actions
    }

    /// Window-level pointer release: ends every active session. A click
    /// (press without drag) selects the note.
    pub fn on_pointer_up(&mut self, host: &mut dyn SceneHost, now_ms: f64) -> Vec<Action> {
        self.pan.on_pointer_up(now_ms);
        let mut clicked = Vec::new();
        let mut finished = false;
        for note in self.notes.values_mut() {
            match note.pointer_up() {
                Release::Click => clicked.push(note.id().to_owned()),
                Release::Finished => finished = true,
                Release::None => {}
            }
        }
        let mut actions = Vec::new();
        if finished {
            actions.push(Action::SetCursor("default".into()));
        }
        for id in clicked {
            actions.extend(self.selection.select(host, &id));
        }
        actions
    }

    /// Pointer hovering a note.
    pub fn on_note_hover(&mut self, host: &dyn SceneHost, id: &str, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        let panning = self.pan.is_panning(now_ms);
        match self.notes.get_mut(id) {
            Some(note) => note.hover(host, screen_pt, panning),
            None => Vec::new(),
        }
    }

    pub fn on_note_hover_leave(&mut self, id: &str) -> Vec<Action> {
        match self.notes.get_mut(id) {
            Some(note) => {
                note.hover_leave();
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Wheel anywhere over the canvas. Panning hides hover chrome at once.
    pub fn on_wheel(&mut self, _delta: WheelDelta, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        self.pan.on_wheel(modifiers, now_ms);
        if !self.pan.is_panning(now_ms) {
            return Vec::new();
        }
        let mut changed = false;
        for note in self.notes.values_mut() {
            if note.is_hovered() {
                note.hover_leave();
                changed = true;
            }
        }
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Keys ---

    pub fn on_key_down(&mut self, host: &mut dyn SceneHost, key: &Key) -> Vec<Action> {
        self.pan.on_key_down(key);
        let mut actions = Vec::new();
        for note in self.notes.values_mut() {
            actions.extend(note.key_down(host, key));
        }
        actions
    }

    pub fn on_key_up(&mut self, key: &Key) {
        self.pan.on_key_up(key);
    }

    // --- Editing ---

    /// Double click on a note body: select it and enter edit mode.
    pub fn on_note_double_click(&mut self, host: &mut dyn SceneHost, id: &str) -> Vec<Action> {
        if !self.notes.contains_key(id) {
            return Vec::new();
        }
        let mut actions = self.selection.select(host, id);
        if let Some(note) = self.notes.get_mut(id) {
            actions.extend(note.begin_edit());
        }
        actions
    }

    pub fn on_note_input(&mut self, id: &str, text: &str) {
        if let Some(note) = self.notes.get_mut(id) {
            note.edit(text);
        }
    }

    pub fn on_note_blur(&mut self, host: &mut dyn SceneHost, id: &str) -> Vec<Action> {
        match self.notes.get_mut(id) {
            Some(note) => note.blur(host),
            None => Vec::new(),
        }
    }

    pub fn toggle_checkbox(&mut self, host: &mut dyn SceneHost, id: &str, line: usize, checked: bool) -> Vec<Action> {
        match self.notes.get_mut(id) {
            Some(note) => note.toggle_checkbox(host, line, checked),
            None => Vec::new(),
        }
    }

    pub fn export_png(&self, id: &str) -> Vec<Action> {
        self.notes.get(id).map(MarkdownNote::export_png).into_iter().collect()
    }
}
