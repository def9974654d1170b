use super::*;
use crate::scene::{AppState, Element, MemoryScene};

fn scene() -> MemoryScene {
    MemoryScene::with_elements(vec![
        Element::note("a", 0.0, 0.0, 200.0, 100.0, ""),
        Element::note("b", 300.0, 0.0, 200.0, 100.0, ""),
    ])
}

fn natively_selected(id: &str) -> MemoryScene {
    let mut s = scene();
    let mut state = AppState::default();
    state.selected_element_ids.insert(id.to_string(), true);
    s.set_app_state(state);
    s
}

#[test]
fn select_emits_selected() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    let actions = store.select(&mut host, "a");
    assert_eq!(actions, vec![Action::NoteSelected { id: "a".into() }]);
    assert!(store.is_selected("a"));
}

#[test]
fn selecting_another_note_deselects_the_first() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    let actions = store.select(&mut host, "b");
    assert_eq!(
        actions,
        vec![Action::NoteDeselected { id: "a".into() }, Action::NoteSelected { id: "b".into() }]
    );
    assert_eq!(store.selected().map(String::as_str), Some("b"));
}

#[test]
fn reselecting_is_quiet() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert!(store.select(&mut host, "a").is_empty());
}

#[test]
fn select_clears_native_selection() {
    let mut host = natively_selected("a");
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert!(host.app_state().selected_element_ids.is_empty());
    assert_eq!(host.update_count(), 1);
}

#[test]
fn select_skips_host_update_when_native_selection_empty() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert_eq!(host.update_count(), 0);
}

#[test]
fn click_outside_deselects() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert_eq!(store.on_document_pointer_down(None), vec![Action::NoteDeselected { id: "a".into() }]);
    assert!(store.selected().is_none());
}

#[test]
fn click_inside_a_note_keeps_selection() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert!(store.on_document_pointer_down(Some("b")).is_empty());
    assert!(store.is_selected("a"));
}

#[test]
fn deselect_if_only_matches_selected() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    assert!(store.deselect_if("b").is_empty());
    assert_eq!(store.deselect_if("a").len(), 1);
}

#[test]
fn reset_is_silent() {
    let mut host = scene();
    let mut store = SelectionStore::new();
    store.select(&mut host, "a");
    store.reset();
    assert!(store.selected().is_none());
    assert!(store.deselect().is_empty());
}
