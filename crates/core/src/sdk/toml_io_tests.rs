// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::sdk::allowlist::PathAllowlist;
use crate::value::OrderedMap;

#[test]
fn write_then_read_round_trips_a_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let path = dir.path().join("config.toml");

    let mut map = OrderedMap::new();
    map.insert("name".to_owned(), Value::string("demo"));
    map.insert("count".to_owned(), Value::Scalar(crate::value::Scalar::Int(3)));
    let value = Value::Mapping(map);

    assert!(toml_write_file(&allowlist, &path, &value).unwrap());
    let read_back = toml_read_file(&allowlist, &path).unwrap();
    assert_eq!(read_back.get_ci("name").and_then(|v| v.as_str().map(str::to_owned)), Some("demo".to_owned()));
}

#[test]
fn denied_path_is_a_resolution_error() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let result = toml_read_file(&allowlist, Path::new("/etc/passwd"));
    assert!(matches!(result, Err(EngineError::Resolution(_))));
}
