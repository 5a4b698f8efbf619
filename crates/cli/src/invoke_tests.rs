// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use remake_engine_core::operation::ScriptType;

use super::*;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["remake-engine"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn build_operation_carries_script_type_and_args() {
    let c = cli(&[
        "--game",
        "demo",
        "--script",
        "format-extract",
        "--script-type",
        "engine",
        "--arg",
        "in.txd",
        "--arg",
        "out",
    ]);
    let op = build_operation(&c);
    assert_eq!(op.script(), Some("format-extract"));
    assert_eq!(op.script_type(), Some(ScriptType::Engine));
    assert_eq!(op.args().iter().filter_map(Value::as_str).collect::<Vec<_>>(), vec!["in.txd", "out"]);
}

#[test]
fn build_operation_parses_json_args_list() {
    let c = cli(&["--game", "demo", "--script", "x", "--args", "[\"a\",\"b\"]"]);
    let op = build_operation(&c);
    assert_eq!(op.args().iter().filter_map(Value::as_str).collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn build_operation_folds_set_and_extra_fields() {
    let c = cli(&["--game", "demo", "--script", "format-convert", "--set", "tool=ffmpeg", "--", "--mode", "audio"]);
    let op = build_operation(&c);
    assert_eq!(op.tool(), Some("ffmpeg"));
}

#[test]
fn build_answers_applies_explicit_overrides_over_declared_defaults() {
    let mut fields = OrderedMap::new();
    fields.insert("script".to_owned(), Value::string("noop"));
    let op = Operation::from_mapping(fields);
    let c = cli(&["--game", "demo", "--script", "noop", "--answer", "Scale=4x"]);
    let answers = build_answers(&op, &c);
    assert_eq!(answers.get("Scale"), Some(&Value::string("4x")));
}

#[test]
fn resolve_module_falls_back_to_synthetic_when_unregistered() {
    let repo = PathBuf::from("/tmp/nonexistent-repo-root-for-tests");
    let c = cli(&["--game", "demo", "--script", "noop"]);
    let module = resolve_module(&c, &repo);
    assert_eq!(module.name, "demo");
    assert!(!module.is_registered);
}
