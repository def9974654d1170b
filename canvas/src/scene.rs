//! Scene model: host elements, host view state, and the `SceneHost` seam.
//!
//! The host drawing engine owns the scene. This module defines the snapshot
//! types read from it (`Element`, `AppState`), the sparse mutation types sent
//! back (`ElementPatch`, `SceneUpdate`), and the `SceneHost` trait through
//! which every mutation flows. The host is always injected; nothing here looks
//! it up globally.
//!
//! Every update replaces the host's whole element array, so concurrent
//! sessions on different notes resolve as last-write-wins.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::MARKDOWN_NOTE_TYPE;

/// Opaque identifier assigned by the host.
pub type ElementId = String;

/// Fresh id for an element created on this side of the boundary.
#[must_use]
pub fn new_element_id() -> ElementId {
    uuid::Uuid::new_v4().to_string()
}

/// Host-defined extra data attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomData {
    /// Overlay kind marker (`"markdown-note"` for notes).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Markdown source of a note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Any other keys, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A positioned, sized object in the host scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Host element type (`"rectangle"`, `"image"`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Clockwise rotation in radians around the bounding-box center.
    #[serde(default)]
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    /// Host fields this crate does not interpret. Preserved across updates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Element {
    /// A new markdown note element backed by a host rectangle.
    #[must_use]
    pub fn note(id: impl Into<ElementId>, x: f64, y: f64, width: f64, height: f64, content: &str) -> Self {
        Self {
            id: id.into(),
            kind: "rectangle".into(),
            x,
            y,
            width,
            height,
            angle: 0.0,
            custom_data: Some(CustomData {
                kind: Some(MARKDOWN_NOTE_TYPE.into()),
                content: Some(content.into()),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Whether this element carries the markdown note marker.
    #[must_use]
    pub fn is_markdown_note(&self) -> bool {
        self.custom_data
            .as_ref()
            .and_then(|d| d.kind.as_deref())
            .is_some_and(|k| k == MARKDOWN_NOTE_TYPE)
    }

    /// Markdown content, empty when absent.
    #[must_use]
    pub fn content(&self) -> &str {
        self.custom_data
            .as_ref()
            .and_then(|d| d.content.as_deref())
            .unwrap_or("")
    }

    /// Apply the present fields of `patch`.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(a) = patch.angle {
            self.angle = a;
        }
        if let Some(ref content) = patch.content {
            self.custom_data.get_or_insert_with(CustomData::default).content = Some(content.clone());
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub angle: Option<f64>,
    pub content: Option<String>,
}

impl ElementPatch {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    #[must_use]
    pub fn angle(angle: f64) -> Self {
        Self { angle: Some(angle), ..Default::default() }
    }

    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }
}

/// Zoom wrapper matching the host's `{ value }` shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom {
    pub value: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}

/// Ephemeral view state supplied by the host on every render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub zoom: Zoom,
    /// The host's native multi-selection.
    #[serde(default)]
    pub selected_element_ids: HashMap<ElementId, bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sparse app-state change sent alongside (or instead of) new elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_element_ids: Option<HashMap<ElementId, bool>>,
}

/// One mutation of the host scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneUpdate {
    /// Replacement for the whole element array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_state: Option<AppStatePatch>,
}

/// Why the host could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("host api has no `{0}` function")]
    MissingMethod(&'static str),

    #[error("`{method}` threw: {message}")]
    Call { method: &'static str, message: String },

    #[error("`{0}` returned nothing")]
    Empty(&'static str),

    #[error("host JSON mismatch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("host scene is unavailable")]
    Unavailable,
}

/// The host canvas capability: read the scene, read the view, replace the scene.
pub trait SceneHost {
    /// Snapshot of every element in draw order.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host cannot be read. That is never the
    /// same as an empty scene.
    fn scene_elements(&self) -> Result<Vec<Element>, HostError>;

    /// Current view state.
    fn app_state(&self) -> AppState;

    /// Apply an update. Elements, when present, replace the whole array.
    fn update_scene(&mut self, update: SceneUpdate);
}

/// Look up one element in the host's current snapshot. `None` when it is
/// missing or the host cannot be read.
#[must_use]
pub fn find_element(host: &dyn SceneHost, id: &str) -> Option<Element> {
    match host.scene_elements() {
        Ok(elements) => elements.into_iter().find(|e| e.id == id),
        Err(e) => {
            tracing::error!(error = %e, %id, "element lookup failed");
            None
        }
    }
}

/// Patch one element and write the whole array back. Returns false (and
/// leaves the scene alone) when the element is not in the scene or the scene
/// cannot be read.
pub fn update_element(host: &mut dyn SceneHost, id: &str, patch: &ElementPatch) -> bool {
    let mut elements = match host.scene_elements() {
        Ok(elements) => elements,
        Err(e) => {
            tracing::error!(error = %e, %id, "update skipped: scene unreadable");
            return false;
        }
    };
    let Some(target) = elements.iter_mut().find(|e| e.id == id) else {
        tracing::debug!(%id, "update skipped: element not in scene");
        return false;
    };
    target.apply_patch(patch);
    host.update_scene(SceneUpdate { elements: Some(elements), app_state: None });
    true
}

/// Append an element to the end of the scene (top of the stack). Returns
/// false without writing when the current scene cannot be read.
pub fn append_element(host: &mut dyn SceneHost, element: Element) -> bool {
    let mut elements = match host.scene_elements() {
        Ok(elements) => elements,
        Err(e) => {
            tracing::error!(error = %e, id = %element.id, "append skipped: scene unreadable");
            return false;
        }
    };
    elements.push(element);
    host.update_scene(SceneUpdate { elements: Some(elements), app_state: None });
    true
}

/// In-process scene host for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    elements: Vec<Element>,
    app_state: AppState,
    updates: usize,
    unavailable: bool,
}

impl MemoryScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self { elements, ..Self::default() }
    }

    /// Replace the view state, as the host would on scroll or zoom.
    pub fn set_app_state(&mut self, app_state: AppState) {
        self.app_state = app_state;
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Make reads fail, as a host that has gone away would.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Number of `update_scene` calls received.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl SceneHost for MemoryScene {
    fn scene_elements(&self) -> Result<Vec<Element>, HostError> {
        if self.unavailable {
            return Err(HostError::Unavailable);
        }
        Ok(self.elements.clone())
    }

    fn app_state(&self) -> AppState {
        self.app_state.clone()
    }

    fn update_scene(&mut self, update: SceneUpdate) {
        self.updates += 1;
        if let Some(elements) = update.elements {
            self.elements = elements;
        }
        if let Some(patch) = update.app_state {
            if let Some(ids) = patch.selected_element_ids {
                self.app_state.selected_element_ids = ids;
            }
        }
    }
}
