// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Mutex;

use super::*;
use crate::operation::PromptType;
use crate::value::OrderedMap;

fn op(fields: Vec<(&str, Value)>) -> Operation {
    let mut map = OrderedMap::new();
    for (k, v) in fields {
        map.insert(k.to_owned(), v);
    }
    Operation::from_mapping(map)
}

fn prompt(name: &str, prompt_type: &str, default: Option<Value>, condition: Option<&str>) -> Value {
    let mut map = OrderedMap::new();
    map.insert("Name".to_owned(), Value::string(name));
    map.insert("type".to_owned(), Value::string(prompt_type));
    if let Some(d) = default {
        map.insert("default".to_owned(), d);
    }
    if let Some(c) = condition {
        map.insert("condition".to_owned(), Value::string(c));
    }
    Value::Mapping(map)
}

#[test]
fn select_collects_init_then_run_all_without_duplicates() {
    let ops = vec![
        op(vec![("init", Value::bool(true))]),
        op(vec![("run-all", Value::bool(true))]),
        op(vec![("init", Value::bool(true)), ("run-all", Value::bool(true))]),
        op(vec![]),
    ];
    assert_eq!(select(&ops), vec![0, 2, 1]);
}

#[test]
fn select_falls_back_to_the_full_list_when_nothing_matches() {
    let ops = vec![op(vec![]), op(vec![])];
    assert_eq!(select(&ops), vec![0, 1]);
}

#[test]
fn derive_prompt_answers_uses_declared_defaults() {
    let operation = op(vec![(
        "prompts",
        Value::List(vec![prompt("Scale", "text", Some(Value::string("2x")), None)]),
    )]);
    let answers = derive_prompt_answers(&operation);
    assert_eq!(answers.get("Scale"), Some(&Value::string("2x")));
}

#[test]
fn derive_prompt_answers_uses_type_empty_value_when_no_default() {
    let operation = op(vec![(
        "prompts",
        Value::List(vec![prompt("DoThing", "confirm", None, None)]),
    )]);
    let answers = derive_prompt_answers(&operation);
    assert_eq!(answers.get("DoThing"), Some(&Value::bool(false)));
}

#[test]
fn derive_prompt_answers_gates_on_condition() {
    let operation = op(vec![(
        "prompts",
        Value::List(vec![
            prompt("Enabled", "confirm", Some(Value::bool(false)), None),
            prompt("Extra", "text", Some(Value::string("x")), Some("Enabled")),
        ]),
    )]);
    let answers = derive_prompt_answers(&operation);
    // "Enabled" resolves to its own default (false), so "Extra" is gated off.
    assert_eq!(answers.get("Extra"), Some(&PromptType::Text.empty_value()));
}

#[test]
fn derive_prompt_answers_lets_a_true_condition_default_through() {
    let operation = op(vec![(
        "prompts",
        Value::List(vec![
            prompt("Enabled", "confirm", Some(Value::bool(true)), None),
            prompt("Extra", "text", Some(Value::string("x")), Some("Enabled")),
        ]),
    )]);
    let answers = derive_prompt_answers(&operation);
    assert_eq!(answers.get("Extra"), Some(&Value::string("x")));
}

struct CollectingSink {
    events: Mutex<Vec<Event>>,
}

impl CollectingSink {
    fn new() -> Self {
        Self { events: Mutex::new(Vec::new()) }
    }
}

impl EventSink for CollectingSink {
    fn on_output(&self, _line: &str, _stream: OutputStream) {}
    fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn run_all_falls_back_to_full_list_and_reports_completion() {
    let dir = tempfile::tempdir().unwrap();
    let ops_path = dir.path().join("operations.toml");
    std::fs::write(
        &ops_path,
        r#"
[[setup]]
Name = "noop"
script_type = "engine"
script = "rename-folders"
args = []
"#,
    )
    .unwrap();

    let module = ModuleInfo {
        name: "demo".to_owned(),
        id: None,
        game_root: dir.path().to_path_buf(),
        ops_file: Some(ops_path),
        exe_path: None,
        title: None,
        url: None,
        is_registered: true,
        is_installed: true,
        is_built: false,
        is_unverified: false,
        is_internal: false,
    };
    let config = EngineConfig::default();
    let sink = Arc::new(CollectingSink::new());
    let cancel = CancellationToken::new();
    let collaborators = ExternalCollaborators::unconfigured();

    let result =
        run_all(&module, dir.path(), &config, sink.clone(), cancel, &collaborators, None).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.succeeded, 1);
    assert!(result.success);

    let events = sink.events.lock().unwrap();
    assert!(events.iter().any(|e| matches!(e, Event::RunAllStart { .. })));
    assert!(events.iter().any(|e| matches!(e, Event::RunAllComplete { success: true, .. })));
}

#[tokio::test]
async fn run_all_stops_immediately_when_cancelled_before_starting() {
    let dir = tempfile::tempdir().unwrap();
    let ops_path = dir.path().join("operations.toml");
    std::fs::write(
        &ops_path,
        r#"
[[setup]]
Name = "noop"
script_type = "engine"
script = "rename-folders"
args = []
"#,
    )
    .unwrap();

    let module = ModuleInfo {
        name: "demo".to_owned(),
        id: None,
        game_root: dir.path().to_path_buf(),
        ops_file: Some(ops_path),
        exe_path: None,
        title: None,
        url: None,
        is_registered: true,
        is_installed: true,
        is_built: false,
        is_unverified: false,
        is_internal: false,
    };
    let config = EngineConfig::default();
    let sink = Arc::new(CollectingSink::new());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let collaborators = ExternalCollaborators::unconfigured();

    let result =
        run_all(&module, dir.path(), &config, sink, cancel, &collaborators, None).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.succeeded, 0);
}
