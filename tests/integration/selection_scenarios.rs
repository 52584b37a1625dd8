//! Active-target selection across successive passes

use statescope::document::{AppDocument, EditorState};
use statescope::inspector::Inspector;
use statescope::targets::{Selection, SelectionTracker};
use tempfile::TempDir;

use crate::integration::{write_fixture, APP_JSON, EDITOR_JSON};

fn load() -> (AppDocument, EditorState) {
    let temp_dir = TempDir::new().unwrap();
    let app = AppDocument::load(&write_fixture(temp_dir.path(), "app.json", APP_JSON)).unwrap();
    let editor =
        EditorState::load(&write_fixture(temp_dir.path(), "editor.json", EDITOR_JSON)).unwrap();
    (app, editor)
}

#[test]
fn test_widget_selection_after_page_only_selection() {
    let (app, mut editor) = load();
    let previous = Selection {
        widget_id: None,
        global_widget_id: None,
        page_component_selected: false,
        active_page_id: Some("p1".to_string()),
    };
    let mut inspector = Inspector::default().with_tracker(SelectionTracker::with_previous(previous));

    editor.selection = Selection::widget("w1").on_page("p1");
    let snapshot = inspector.rebuild(&app, &editor);
    assert_eq!(snapshot.active_target.as_deref(), Some("widget:w1"));
}

#[test]
fn test_global_widget_outranks_page_widget() {
    let (app, mut editor) = load();
    editor.selection = Selection {
        widget_id: Some("nameInput".to_string()),
        global_widget_id: Some("sidebar".to_string()),
        page_component_selected: false,
        active_page_id: Some("p1".to_string()),
    };
    let snapshot = Inspector::default().rebuild(&app, &editor);
    assert_eq!(snapshot.active_target.as_deref(), Some("widget:sidebar"));
}

#[test]
fn test_page_component_selection() {
    let (app, mut editor) = load();
    editor.selection = Selection {
        page_component_selected: true,
        ..Selection::default().on_page("p1")
    };
    let snapshot = Inspector::default().rebuild(&app, &editor);
    assert_eq!(snapshot.active_target.as_deref(), Some("page:p1"));
    assert_eq!(snapshot.resolved_state_tree["isActive"], serde_json::json!(true));
}

#[test]
fn test_manual_activation_survives_unchanged_selection() {
    let (app, editor) = load();
    let mut inspector = Inspector::default();
    assert_eq!(
        inspector.rebuild(&app, &editor).active_target.as_deref(),
        Some("widget:nameInput")
    );

    inspector.activate("query:q1").unwrap();
    let snapshot = inspector.rebuild(&app, &editor);
    assert_eq!(snapshot.active_target.as_deref(), Some("query:q1"));
    assert_eq!(snapshot.resolved_state_tree["name"], serde_json::json!("Users"));
}

#[test]
fn test_removed_target_falls_back_to_first() {
    let (mut app, editor) = load();
    let mut inspector = Inspector::default();
    inspector.rebuild(&app, &editor);

    app.pages[0].widgets.retain(|w| w.id != "nameInput");
    let snapshot = inspector.rebuild(&app, &editor);
    assert_eq!(snapshot.active_target.as_deref(), Some("global:currentUser"));
}
