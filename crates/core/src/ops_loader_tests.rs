// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn toml_dialect_preserves_group_and_declaration_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "operations.toml",
        r#"
            [[Setup]]
            Name = "A"

            [[Setup]]
            Name = "B"

            [[Main]]
            Name = "C"
        "#,
    );
    let ops = load(&path).unwrap();
    let names: Vec<_> = ops.iter().filter_map(Operation::name).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn json_flat_array_dialect() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "operations.json", r#"[{"Name": "A"}, {"Name": "B"}]"#);
    let ops = load(&path).unwrap();
    let names: Vec<_> = ops.iter().filter_map(Operation::name).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn json_grouped_dialect_flattens_preserving_group_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "operations.json",
        r#"{"Setup": [{"Name": "A"}, {"Name": "B"}], "Main": [{"Name": "C"}]}"#,
    );
    let ops = load(&path).unwrap();
    let names: Vec<_> = ops.iter().filter_map(Operation::name).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn unknown_keys_are_preserved_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "operations.json",
        r#"[{"Name": "A", "totally_custom_key": "kept"}]"#,
    );
    let ops = load(&path).unwrap();
    assert_eq!(
        ops[0].fields.get("totally_custom_key").and_then(Value::as_str),
        Some("kept")
    );
}

#[test]
fn unrecognized_extension_is_an_infrastructure_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "operations.yaml", "- Name: A\n");
    assert!(matches!(load(&path), Err(EngineError::Infrastructure(_))));
}
