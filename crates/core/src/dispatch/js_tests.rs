// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::{Event, EventSink, OutputStream};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl EventSink for RecordingSink {
    fn on_output(&self, _line: &str, _stream: OutputStream) {}
    fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[test]
fn console_log_reaches_the_sdk_print_event() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("main.js");
    std::fs::write(&script, "console.log('hello from js');").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink.clone());
    run(&script, &[], &sdk, dir.path()).unwrap();

    assert!(sink
        .events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, Event::Print { message, .. } if message == "hello from js")));
}

#[test]
fn argv_is_bound_as_a_js_array() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("args.js");
    std::fs::write(&script, "if (argv[0] !== 'a' || argc !== 1) { throw new Error('mismatch'); }")
        .unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink);
    run(&script, &["a".to_owned()], &sdk, dir.path()).unwrap();
}

#[test]
fn requiring_a_legacy_shim_module_does_not_throw() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("legacy.js");
    std::fs::write(&script, "var lfs = require('lfs');").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink);
    run(&script, &[], &sdk, dir.path()).unwrap();
}

#[test]
fn requiring_an_unknown_module_throws() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("unknown.js");
    std::fs::write(&script, "require('totally-unknown-module');").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink);
    assert!(run(&script, &[], &sdk, dir.path()).is_err());
}
