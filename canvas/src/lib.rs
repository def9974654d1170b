//! Markdown note overlays for a host drawing canvas.
//!
//! Notes are ordinary host elements tagged with `customData.type =
//! "markdown-note"`. This crate owns everything the overlay does on top of
//! them: drag, resize, and rotate gestures, hover chrome, edit mode, task
//! checkboxes, and a single-note selection kept apart from the host's own.
//! It compiles to WebAssembly; the host page forwards DOM input to
//! [`engine::NoteEngine`] and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | App-root [`engine::NoteEngine`] and the [`engine::Action`] type |
//! | [`note`] | One mounted note: gesture arbitration and edit state |
//! | [`drag`] | Drag threshold and position updates |
//! | [`resize`] | Eight-handle resize, clamping, edge proximity |
//! | [`rotate`] | Unwrapped rotation around the note center |
//! | [`pan`] | Infers canvas panning from wheel, pointer, and key input |
//! | [`selection`] | Single-note selection store |
//! | [`markdown`] | Task checkboxes, HTML rendering, export names |
//! | [`scene`] | Host element/view types and the [`scene::SceneHost`] seam |
//! | [`host_js`] | `SceneHost` over the host's JavaScript API object |
//! | [`camera`] | Scroll/zoom viewport and coordinate conversions |
//! | [`input`] | Input event types |
//! | [`consts`] | Thresholds and minimum sizes |

pub mod camera;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod host_js;
pub mod input;
pub mod markdown;
pub mod note;
pub mod pan;
pub mod resize;
pub mod rotate;
pub mod scene;
pub mod selection;
