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
fn script_can_print_through_the_sdk() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("main.lua");
    std::fs::write(&script, "sdk.print('hello from lua')").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink.clone());
    run(&script, &[], &sdk).unwrap();

    assert!(sink
        .events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, Event::Print { message, .. } if message == "hello from lua")));
}

#[test]
fn io_popen_is_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("escape.lua");
    std::fs::write(&script, "io.popen('echo pwned')").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink);
    let result = run(&script, &[], &sdk);
    assert!(result.is_err());
}

#[test]
fn argv_and_argc_are_bound() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("args.lua");
    std::fs::write(&script, "assert(argc == 2); assert(argv[1] == 'a')").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let sdk = Sdk::new(dir.path(), sink);
    run(&script, &["a".to_owned(), "b".to_owned()], &sdk).unwrap();
}
