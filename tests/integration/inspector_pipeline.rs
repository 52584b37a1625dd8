//! End-to-end inspector passes over loaded documents

use serde_json::{json, Value};
use statescope::document::{AppDocument, EditorState};
use statescope::inspector::Inspector;
use statescope::query::{synthesize_query_state, QueryDescriptor};
use statescope::search::Filtered;
use statescope::targets::TargetGroup;
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
fn test_duplicate_widget_id_keeps_global_occurrence() {
    let (app, editor) = load();
    let snapshot = Inspector::default().rebuild(&app, &editor);

    let widgets = &snapshot.targets_by_group[&TargetGroup::Widgets];
    let ids: Vec<&str> = widgets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["widget:w1", "widget:sidebar", "widget:nameInput", "widget:form", "widget:agree"]
    );
    assert_eq!(
        snapshot.target("widget:w1").unwrap().state["value"],
        json!("global copy")
    );
    assert_eq!(snapshot.target_count(), 6 + 1 + 1 + 1 + 5);
}

#[test]
fn test_widget_state_is_resolved_validated_and_defaulted() {
    let (app, editor) = load();
    let snapshot = Inspector::default().rebuild(&app, &editor);

    let name_input = &snapshot.target("widget:nameInput").unwrap().state;
    assert_eq!(name_input["value"], json!("Grace"));
    assert_eq!(name_input["placeholder"], json!(""));
    assert_eq!(name_input["margin"], json!("4px 8px"));
    assert_eq!(name_input["hidden"], json!(false));

    let agree = &snapshot.target("widget:agree").unwrap().state;
    assert_eq!(agree["value"], json!(false));

    let form = &snapshot.target("widget:form").unwrap().state;
    assert_eq!(form["margin"], json!("0px"));
    assert_eq!(form["heightMode"], json!("auto"));
}

#[test]
fn test_query_transformer_and_page_targets() {
    let (app, editor) = load();
    let snapshot = Inspector::default().rebuild(&app, &editor);

    let users = &snapshot.target("query:q1").unwrap().state;
    assert_eq!(users["data"], json!([{"name": "Grace"}]));
    assert_eq!(users["status"], json!("success"));
    assert_eq!(users["receivedAt"], json!("2024-05-01T12:00:00.000Z"));
    assert_eq!(users["pluginType"], json!("RestQuery"));

    assert_eq!(
        snapshot.target("transformer:t1").unwrap().state,
        json!({"id": "t1", "name": "firstUser", "value": "Grace"})
    );
    assert_eq!(
        snapshot.target("page:p1").unwrap().state,
        json!({"id": "p1", "name": "Home", "hidden": false, "isActive": true})
    );
    assert_eq!(
        snapshot.target("global:viewport").unwrap().state,
        json!({"width": 1280, "height": 720})
    );
}

#[test]
fn test_selected_widget_is_the_resolved_tree() {
    let (app, editor) = load();
    let snapshot = Inspector::default().rebuild(&app, &editor);

    assert_eq!(snapshot.active_target.as_deref(), Some("widget:nameInput"));
    assert_eq!(snapshot.resolved_state_tree["value"], json!("Grace"));

    match snapshot.search("grace") {
        Filtered::Match(tree) => assert_eq!(tree, json!({"value": "Grace"})),
        Filtered::NoMatch => panic!("expected a match"),
    }
    assert_eq!(snapshot.search("no such text"), Filtered::NoMatch);
}

#[test]
fn test_query_without_config_or_run_is_fully_defaulted() {
    let descriptor = QueryDescriptor::new("q1", "Users", "rest").with_config(json!({}));
    let state = synthesize_query_state(&descriptor, None).to_value();

    assert_eq!(state["data"], json!({"data": null, "error": null, "statusCode": null}));
    assert_eq!(state["isFetching"], json!(false));
    assert_eq!(state["pluginType"], json!("RestQuery"));
    assert_eq!(state["notificationDuration"], json!(4.5));
    assert_eq!(state["queryTimeout"], json!(0));
    assert_eq!(state["showFailureToaster"], json!(false));
}

#[test]
fn test_context_is_deterministic_and_memoized() {
    let (app, editor) = load();
    let mut inspector = Inspector::default();

    let first = inspector.context(&app, &editor);
    let second = inspector.context(&app, &editor);
    assert_eq!(first, second);
    assert_eq!(inspector.context_builds(), 1);

    assert_eq!(first.get("Users"), first.get("q1"));
    assert_eq!(first.get("w1").unwrap()["value"], json!("global copy"));
    assert_eq!(first.get("nameInput").unwrap()["value"], json!("Grace"));
    assert_eq!(
        first.get("app").unwrap()["pages"],
        json!([{"id": "p1", "name": "Home"}])
    );
    assert_eq!(first.get("localStorage"), Some(&Value::Object(Default::default())));

    let mut bumped = editor.clone();
    bumped.refresh_counter += 1;
    assert_eq!(inspector.context(&app, &bumped), first);
    assert_eq!(inspector.context_builds(), 2);
}

#[test]
fn test_chained_widget_bindings_resolve_through_the_context() {
    let temp_dir = TempDir::new().unwrap();
    let app = AppDocument::load(&write_fixture(
        temp_dir.path(),
        "app.json",
        r#"{
          "pages": [{
            "id": "p1",
            "name": "Home",
            "widgets": [
              {"id": "text1", "type": "text", "properties": {"value": "{{ input1.value }}"}},
              {"id": "input1", "type": "textInput", "properties": {"value": "{{ urlparams.name }}"}}
            ]
          }]
        }"#,
    ))
    .unwrap();
    let editor = EditorState::load(&write_fixture(
        temp_dir.path(),
        "editor.json",
        r#"{"facts": {"location": {"query": {"name": "Ada"}, "hash": {}}}}"#,
    ))
    .unwrap();

    let mut inspector = Inspector::default();
    let context = inspector.context(&app, &editor);
    assert_eq!(context.get("text1").unwrap()["value"], json!("Ada"));

    let snapshot = inspector.rebuild(&app, &editor);
    assert_eq!(snapshot.target("widget:input1").unwrap().state["value"], json!("Ada"));
    assert_eq!(snapshot.target("widget:text1").unwrap().state["value"], json!("Ada"));
}
