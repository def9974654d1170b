//! [`SceneHost`] over the host drawing engine's JavaScript API object.
//!
//! The API object is handed in by the embedding page (never read from
//! `window`) and must expose `getSceneElements()`, `getAppState()`, and
//! `updateScene(update)`. Values cross the boundary as JSON so the serde
//! shapes in [`crate::scene`] are the single source of truth.
//!
//! A failed element read is returned to the caller, which must not mistake it
//! for an empty scene. A failed view read is logged and yields the default
//! view, and a failed write is logged and leaves the host untouched.

use js_sys::{Function, JSON, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};

use crate::scene::{AppState, Element, HostError, SceneHost, SceneUpdate};

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub struct JsSceneHost {
    api: JsValue,
}

impl JsSceneHost {
    #[must_use]
    pub fn new(api: JsValue) -> Self {
        Self { api }
    }

    fn method(&self, name: &'static str) -> Result<Function, HostError> {
        Reflect::get(&self.api, &JsValue::from_str(name))
            .map_err(|e| HostError::Call { method: name, message: describe(&e) })?
            .dyn_into::<Function>()
            .map_err(|_| HostError::MissingMethod(name))
    }

    fn read<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, HostError> {
        let value = self
            .method(name)?
            .call0(&self.api)
            .map_err(|e| HostError::Call { method: name, message: describe(&e) })?;
        if value.is_undefined() || value.is_null() {
            return Err(HostError::Empty(name));
        }
        let text: String = JSON::stringify(&value)
            .map_err(|e| HostError::Call { method: "JSON.stringify", message: describe(&e) })?
            .into();
        Ok(serde_json::from_str(&text)?)
    }

    /// Current elements, or the reason they could not be read.
    pub fn try_scene_elements(&self) -> Result<Vec<Element>, HostError> {
        self.read("getSceneElements")
    }

    pub fn try_app_state(&self) -> Result<AppState, HostError> {
        self.read("getAppState")
    }

    pub fn try_update_scene(&self, update: &SceneUpdate) -> Result<(), HostError> {
        let text = serde_json::to_string(update)?;
        let arg = JSON::parse(&text).map_err(|e| HostError::Call { method: "JSON.parse", message: describe(&e) })?;
        self.method("updateScene")?
            .call1(&self.api, &arg)
            .map_err(|e| HostError::Call { method: "updateScene", message: describe(&e) })?;
        Ok(())
    }
}

impl SceneHost for JsSceneHost {
    fn scene_elements(&self) -> Result<Vec<Element>, HostError> {
        self.try_scene_elements()
    }

    fn app_state(&self) -> AppState {
        self.try_app_state().unwrap_or_else(|e| {
            tracing::error!(error = %e, "reading app state failed");
            AppState::default()
        })
    }

    fn update_scene(&mut self, update: SceneUpdate) {
        if let Err(e) = self.try_update_scene(&update) {
            tracing::error!(error = %e, "scene update dropped");
        }
    }
}
