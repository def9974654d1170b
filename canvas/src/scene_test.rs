#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn two_notes() -> MemoryScene {
    MemoryScene::with_elements(vec![
        Element::note("a", 0.0, 0.0, 200.0, 100.0, "# A"),
        Element::note("b", 300.0, 0.0, 200.0, 100.0, "# B"),
    ])
}

// =============================================================
// Element (de)serialization
// =============================================================

#[test]
fn element_deserializes_host_json() {
    let el: Element = serde_json::from_value(json!({
        "id": "abc",
        "type": "rectangle",
        "x": 10.0,
        "y": 20.0,
        "width": 200.0,
        "height": 100.0,
        "angle": 0.5,
        "strokeColor": "#1e1e1e",
        "customData": { "type": "markdown-note", "content": "- [ ] todo" }
    }))
    .unwrap();
    assert_eq!(el.id, "abc");
    assert_eq!(el.kind, "rectangle");
    assert_eq!(el.angle, 0.5);
    assert!(el.is_markdown_note());
    assert_eq!(el.content(), "- [ ] todo");
}

#[test]
fn element_round_trip_keeps_unknown_host_fields() {
    let raw = json!({
        "id": "abc",
        "type": "rectangle",
        "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0, "angle": 0.0,
        "version": 7,
        "boundElements": null,
        "customData": { "type": "markdown-note", "content": "x", "theme": "dark" }
    });
    let el: Element = serde_json::from_value(raw).unwrap();
    let back = serde_json::to_value(&el).unwrap();
    assert_eq!(back["version"], 7);
    assert!(back.get("boundElements").is_some());
    assert_eq!(back["customData"]["theme"], "dark");
}

#[test]
fn element_without_custom_data_is_not_a_note() {
    let el: Element = serde_json::from_value(json!({ "id": "r", "type": "rectangle" })).unwrap();
    assert!(!el.is_markdown_note());
    assert_eq!(el.content(), "");
}

#[test]
fn app_state_deserializes_camel_case() {
    let state: AppState = serde_json::from_value(json!({
        "scrollX": 5.0,
        "scrollY": -3.0,
        "zoom": { "value": 2.0 },
        "selectedElementIds": { "a": true },
        "theme": "light"
    }))
    .unwrap();
    assert_eq!(state.scroll_x, 5.0);
    assert_eq!(state.zoom.value, 2.0);
    assert_eq!(state.selected_element_ids.get("a"), Some(&true));
}

#[test]
fn app_state_defaults_zoom_to_one() {
    let state: AppState = serde_json::from_value(json!({})).unwrap();
    assert_eq!(state.zoom.value, 1.0);
}

#[test]
fn scene_update_serializes_only_present_parts() {
    let update = SceneUpdate {
        elements: None,
        app_state: Some(AppStatePatch { selected_element_ids: Some(HashMap::new()) }),
    };
    let value = serde_json::to_value(&update).unwrap();
    assert!(value.get("elements").is_none());
    assert_eq!(value["appState"]["selectedElementIds"], json!({}));
}

// =============================================================
// Patching
// =============================================================

#[test]
fn apply_patch_only_touches_present_fields() {
    let mut el = Element::note("a", 1.0, 2.0, 3.0, 4.0, "keep");
    el.apply_patch(&ElementPatch { x: Some(9.0), ..Default::default() });
    assert_eq!(el.x, 9.0);
    assert_eq!(el.y, 2.0);
    assert_eq!(el.content(), "keep");
}

#[test]
fn apply_patch_content_creates_custom_data() {
    let mut el: Element = serde_json::from_value(json!({ "id": "r", "type": "rectangle" })).unwrap();
    el.apply_patch(&ElementPatch::content("hello"));
    assert_eq!(el.content(), "hello");
}

#[test]
fn update_element_replaces_whole_array() {
    let mut scene = two_notes();
    assert!(update_element(&mut scene, "b", &ElementPatch::position(10.0, 20.0)));
    assert_eq!(scene.update_count(), 1);
    let b = scene.element("b").unwrap();
    assert_eq!((b.x, b.y), (10.0, 20.0));
    assert_eq!(scene.element("a").unwrap().x, 0.0);
    assert_eq!(scene.scene_elements().unwrap().len(), 2);
}

#[test]
fn update_element_missing_id_is_a_noop() {
    let mut scene = two_notes();
    assert!(!update_element(&mut scene, "zzz", &ElementPatch::angle(1.0)));
    assert_eq!(scene.update_count(), 0);
}

#[test]
fn append_element_goes_on_top() {
    let mut scene = two_notes();
    assert!(append_element(&mut scene, Element::note("c", 0.0, 0.0, 10.0, 10.0, "")));
    let ids: Vec<_> = scene.scene_elements().unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn unreadable_scene_is_never_overwritten() {
    let mut scene = two_notes();
    scene.set_unavailable(true);
    assert!(matches!(scene.scene_elements(), Err(HostError::Unavailable)));
    assert!(!append_element(&mut scene, Element::note("c", 0.0, 0.0, 10.0, 10.0, "")));
    assert!(!update_element(&mut scene, "a", &ElementPatch::content("lost")));
    assert!(find_element(&scene, "a").is_none());
    assert_eq!(scene.update_count(), 0);

    scene.set_unavailable(false);
    let ids: Vec<_> = scene.scene_elements().unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(scene.element("a").unwrap().content(), "# A");
}

#[test]
fn find_element_returns_snapshot_copy() {
    let scene = two_notes();
    assert_eq!(find_element(&scene, "a").unwrap().content(), "# A");
    assert!(find_element(&scene, "nope").is_none());
}

#[test]
fn memory_scene_applies_selection_patch() {
    let mut scene = two_notes();
    let mut ids = HashMap::new();
    ids.insert("a".to_string(), true);
    scene.update_scene(SceneUpdate {
        elements: None,
        app_state: Some(AppStatePatch { selected_element_ids: Some(ids) }),
    });
    assert_eq!(scene.app_state().selected_element_ids.len(), 1);
    assert_eq!(scene.scene_elements().unwrap().len(), 2);
}

#[test]
fn new_element_ids_are_unique() {
    let a = new_element_id();
    let b = new_element_id();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36);
}
