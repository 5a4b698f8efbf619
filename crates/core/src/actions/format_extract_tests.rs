// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::{Event, OutputStream};
use crate::value::OrderedMap;
use crate::value::Value;

struct NullSink;
impl EventSink for NullSink {
    fn on_output(&self, _line: &str, _stream: OutputStream) {}
    fn on_event(&self, _event: &Event) {}
}

fn op(fields: Vec<(&str, Value)>) -> Operation {
    let mut map = OrderedMap::new();
    for (k, v) in fields {
        map.insert(k.to_owned(), v);
    }
    Operation::from_mapping(map)
}

#[test]
fn rejects_non_txd_format() {
    let operation = op(vec![("format", Value::string("obj"))]);
    let result = run(&operation, &["in".to_owned(), "out".to_owned()], &NullSink);
    assert!(result.is_err());
}

#[test]
fn extracts_a_single_txd_file() {
    let tmp = tempfile::tempdir().unwrap();
    let txd_path = tmp.path().join("wall.txd");

    let pixels = vec![0xABu8; 32];
    let mut data = Vec::new();
    data.extend_from_slice(&[0x16, 0x00, 0x00, 0x00]);
    data.extend(crate::txd::test_support::build_dxt1_record("wall", 8, 8, &pixels));
    data.extend(crate::txd::test_support::eof_pattern());
    std::fs::write(&txd_path, &data).unwrap();

    let output_dir = tmp.path().join("out");
    let operation = op(vec![]);
    let count = run(
        &operation,
        &[txd_path.display().to_string(), output_dir.display().to_string()],
        &NullSink,
    )
    .unwrap();
    assert_eq!(count, 1);
    assert!(output_dir.join("wall.dds").is_file());
}
