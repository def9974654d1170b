#![allow(clippy::float_cmp)]

use super::*;
use crate::scene::MemoryScene;

// =============================================================
// Helpers
// =============================================================

fn host_with(content: &str) -> MemoryScene {
    MemoryScene::with_elements(vec![Element::note("n", 100.0, 100.0, 200.0, 100.0, content)])
}

fn mounted(host: &MemoryScene) -> MarkdownNote {
    MarkdownNote::new(host.element("n").unwrap())
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn esc() -> Key {
    Key("Escape".into())
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_example_moves_from_crossing_point() {
    let mut host = host_with("");
    let mut note = mounted(&host);
    note.pointer_down(&host, NotePart::Body, pt(150.0, 150.0), Button::Primary);
    note.pointer_move(&mut host, pt(170.0, 150.0));
    note.pointer_move(&mut host, pt(250.0, 150.0));
    assert_eq!(note.pointer_up(), Release::Finished);
    let el = host.element("n").unwrap();
    assert_eq!((el.x, el.y), (180.0, 100.0));
}

#[test]
fn small_wiggle_is_a_click_and_leaves_element_alone() {
    let mut host = host_with("");
    let mut note = mounted(&host);
    note.pointer_down(&host, NotePart::Body, pt(150.0, 150.0), Button::Primary);
    note.pointer_move(&mut host, pt(153.0, 152.0));
    assert_eq!(note.gesture(), Gesture::Drag);
    assert_eq!(note.pointer_up(), Release::Click);
    assert_eq!(host.update_count(), 0);
    assert_eq!(host.element("n").unwrap().x, 100.0);
}

#[test]
fn drag_respects_host_zoom() {
    let mut host = host_with("");
    let mut state = host.app_state();
    state.zoom.value = 2.0;
    host.set_app_state(state);
    let mut note = mounted(&host);
    note.pointer_down(&host, NotePart::Body, pt(0.0, 0.0), Button::Primary);
    note.pointer_move(&mut host, pt(10.0, 0.0));
    let actions = note.pointer_move(&mut host, pt(30.0, 40.0));
    assert_eq!(actions.len(), 1);
    let el = host.element("n").unwrap();
    assert_eq!((el.x, el.y), (110.0, 120.0));
}

#[test]
fn secondary_button_does_nothing() {
    let host = host_with("");
    let mut note = mounted(&host);
    assert!(note.pointer_down(&host, NotePart::Body, pt(0.0, 0.0), Button::Secondary).is_empty());
    assert_eq!(note.gesture(), Gesture::Idle);
}

#[test]
fn editing_suppresses_all_gestures() {
    let host = host_with("");
    let mut note = mounted(&host);
    note.begin_edit();
    note.pointer_down(&host, NotePart::Body, pt(0.0, 0.0), Button::Primary);
    note.pointer_down(&host, NotePart::ResizeHandle(ResizeHandle::Se), pt(0.0, 0.0), Button::Primary);
    note.pointer_down(&host, NotePart::RotateHandle, pt(0.0, 0.0), Button::Primary);
    assert_eq!(note.gesture(), Gesture::Idle);
}

#[test]
fn second_gesture_is_refused_while_one_is_active() {
    let host = host_with("");
    let mut note = mounted(&host);
    note.pointer_down(&host, NotePart::ResizeHandle(ResizeHandle::Se), pt(300.0, 200.0), Button::Primary);
    assert!(note.pointer_down(&host, NotePart::Body, pt(150.0, 150.0), Button::Primary).is_empty());
    assert_eq!(note.gesture(), Gesture::Resize);
}

#[test]
fn missing_element_is_a_silent_noop() {
    let host = MemoryScene::new();
    let mut note = MarkdownNote::new(&Element::note("n", 0.0, 0.0, 200.0, 100.0, ""));
    assert!(note.pointer_down(&host, NotePart::Body, pt(0.0, 0.0), Button::Primary).is_empty());
    assert_eq!(note.gesture(), Gesture::Idle);
}

// =============================================================
// Resize / rotate
// =============================================================

#[test]
fn resize_writes_clamped_geometry() {
    let mut host = host_with("");
    let mut note = mounted(&host);
    let actions = note.pointer_down(&host, NotePart::ResizeHandle(ResizeHandle::Nw), pt(100.0, 100.0), Button::Primary);
    assert_eq!(actions, vec![Action::SetCursor("nwse-resize".into())]);
    note.pointer_move(&mut host, pt(400.0, 400.0));
    note.pointer_up();
    let el = host.element("n").unwrap();
    assert_eq!((el.width, el.height), (100.0, 80.0));
    assert_eq!((el.x + el.width, el.y + el.height), (300.0, 200.0));
}

#[test]
fn rotate_writes_angle() {
    let mut host = host_with("");
    let mut note = mounted(&host);
    // Center on screen is (200, 150).
    note.pointer_down(&host, NotePart::RotateHandle, pt(200.0, 50.0), Button::Primary);
    note.pointer_move(&mut host, pt(300.0, 150.0));
    assert_eq!(note.pointer_up(), Release::Finished);
    let angle = host.element("n").unwrap().angle;
    assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn cancel_gestures_stops_updates() {
    let mut host = host_with("");
    let mut note = mounted(&host);
    note.pointer_down(&host, NotePart::ResizeHandle(ResizeHandle::Se), pt(300.0, 200.0), Button::Primary);
    note.cancel_gestures();
    assert!(note.pointer_move(&mut host, pt(400.0, 300.0)).is_empty());
    assert_eq!(host.update_count(), 0);
}

// =============================================================
// Hover
// =============================================================

#[test]
fn hover_reveals_corners_and_near_edges() {
    let host = host_with("");
    let mut note = mounted(&host);
    assert_eq!(note.hover(&host, pt(295.0, 150.0), false), vec![Action::RenderNeeded]);
    let handles = note.visible_handles();
    assert!(handles.contains(&ResizeHandle::E));
    assert!(handles.contains(&ResizeHandle::Nw));
    assert!(!handles.contains(&ResizeHandle::N));
}

#[test]
fn hover_while_panning_hides_chrome() {
    let host = host_with("");
    let mut note = mounted(&host);
    note.hover(&host, pt(200.0, 150.0), false);
    note.hover(&host, pt(200.0, 150.0), true);
    assert!(!note.is_hovered());
    assert!(note.visible_handles().is_empty());
}

#[test]
fn repeated_hover_without_change_is_quiet() {
    let host = host_with("");
    let mut note = mounted(&host);
    note.hover(&host, pt(200.0, 150.0), false);
    assert!(note.hover(&host, pt(201.0, 150.0), false).is_empty());
}

// =============================================================
// Editing
// =============================================================

#[test]
fn blur_persists_changed_content() {
    let mut host = host_with("old");
    let mut note = mounted(&host);
    note.begin_edit();
    note.edit("new");
    let actions = note.blur(&mut host);
    assert_eq!(host.element("n").unwrap().content(), "new");
    assert_eq!(actions.last(), Some(&Action::EditEnded { id: "n".into(), saved: true }));
    assert!(!note.is_editing());
}

#[test]
fn blur_without_change_does_not_touch_host() {
    let mut host = host_with("same");
    let mut note = mounted(&host);
    note.begin_edit();
    note.edit("same");
    assert_eq!(note.blur(&mut host), vec![Action::EditEnded { id: "n".into(), saved: false }]);
    assert_eq!(host.update_count(), 0);
}

#[test]
fn escape_ends_editing() {
    let mut host = host_with("a");
    let mut note = mounted(&host);
    note.begin_edit();
    note.edit("b");
    note.key_down(&mut host, &esc());
    assert!(!note.is_editing());
    assert_eq!(host.element("n").unwrap().content(), "b");
}

#[test]
fn escape_outside_edit_mode_is_ignored() {
    let mut host = host_with("a");
    let mut note = mounted(&host);
    assert!(note.key_down(&mut host, &esc()).is_empty());
}

#[test]
fn edit_outside_edit_mode_is_ignored() {
    let host = host_with("a");
    let mut note = mounted(&host);
    note.edit("b");
    assert_eq!(note.content(), "a");
}

#[test]
fn sync_keeps_draft_while_editing() {
    let host = host_with("a");
    let mut note = mounted(&host);
    note.begin_edit();
    note.edit("draft");
    note.sync(&Element::note("n", 0.0, 0.0, 1.0, 1.0, "remote"));
    assert_eq!(note.content(), "draft");
}

#[test]
fn sync_takes_host_content_when_idle() {
    let host = host_with("a");
    let mut note = mounted(&host);
    note.sync(&Element::note("n", 0.0, 0.0, 1.0, 1.0, "remote"));
    assert_eq!(note.content(), "remote");
}

// =============================================================
// Checkboxes and export
// =============================================================

#[test]
fn toggle_checkbox_persists_immediately() {
    let mut host = host_with("- [ ] a\n- [ ] b");
    let mut note = mounted(&host);
    let actions = note.toggle_checkbox(&mut host, 1, true);
    assert_eq!(actions.len(), 1);
    assert_eq!(host.element("n").unwrap().content(), "- [ ] a\n- [x] b");
}

#[test]
fn toggle_checkbox_twice_restores_host_content() {
    let original = "intro\n- [x] done\n";
    let mut host = host_with(original);
    let mut note = mounted(&host);
    note.toggle_checkbox(&mut host, 1, false);
    note.toggle_checkbox(&mut host, 1, true);
    assert_eq!(host.element("n").unwrap().content(), original);
}

#[test]
fn toggle_checkbox_on_plain_line_is_noop() {
    let mut host = host_with("plain");
    let mut note = mounted(&host);
    assert!(note.toggle_checkbox(&mut host, 0, true).is_empty());
    assert_eq!(host.update_count(), 0);
}

#[test]
fn export_png_names_file_after_title() {
    let host = host_with("# Sprint Review\n- [ ] demo");
    let note = mounted(&host);
    assert_eq!(
        note.export_png(),
        Action::ExportRequested { id: "n".into(), file_name: "sprint-review.png".into() }
    );
}
