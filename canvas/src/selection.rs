//! Selection bridge: one selected note at a time, independent of the host's
//! native selection.
//!
//! Notes are drawn by the overlay, so letting the host select the underlying
//! element would draw a second border around it. The store therefore keeps its
//! own single id, clears the host's `selectedElementIds` whenever a note is
//! selected, and reports changes as [`Action::NoteSelected`] /
//! [`Action::NoteDeselected`].
//!
//! One store exists per engine (app root) and is reset on teardown.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashMap;

use crate::engine::Action;
use crate::scene::{AppStatePatch, ElementId, SceneHost, SceneUpdate};

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: Option<ElementId>,
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select `id`, deselecting any previous note, and clear the host's own selection.
    pub fn select(&mut self, host: &mut dyn SceneHost, id: &str) -> Vec<Action> {
        clear_native_selection(host);
        if self.is_selected(id) {
            return Vec::new();
        }
        let mut actions = self.deselect();
        self.selected = Some(id.to_owned());
        actions.push(Action::NoteSelected { id: id.to_owned() });
        actions
    }

    /// Deselect whatever is selected.
    pub fn deselect(&mut self) -> Vec<Action> {
        match self.selected.take() {
            Some(id) => vec![Action::NoteDeselected { id }],
            None => Vec::new(),
        }
    }

    /// Deselect only if `id` is the selected note (e.g. it is being unmounted).
    pub fn deselect_if(&mut self, id: &str) -> Vec<Action> {
        if self.is_selected(id) { self.deselect() } else { Vec::new() }
    }

    /// Capture-phase document press. `target_note` is the id of the closest
    /// `[data-note-id]` ancestor of the press target, if any. Presses outside
    /// every note deselect.
    pub fn on_document_pointer_down(&mut self, target_note: Option<&str>) -> Vec<Action> {
        match target_note {
            Some(_) => Vec::new(),
            None => self.deselect(),
        }
    }

    /// Forget the selection without reporting it (app teardown).
    pub fn reset(&mut self) {
        self.selected = None;
    }
}

fn clear_native_selection(host: &mut dyn SceneHost) {
    if host.app_state().selected_element_ids.values().all(|selected| !selected) {
        return;
    }
    host.update_scene(SceneUpdate {
        elements: None,
        app_state: Some(AppStatePatch { selected_element_ids: Some(HashMap::new()) }),
    });
}
