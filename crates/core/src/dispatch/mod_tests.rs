// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::{Event, EventSink, OutputStream};
use std::sync::Mutex;

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
fn successful_lua_script_wraps_active_start_and_end() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("main.lua");
    std::fs::write(&script, "sdk.print('ok')").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let result = dispatch("lua", &script, &[], dir.path(), sink.clone());

    assert!(result.success);
    let events = sink.events.lock().unwrap();
    assert!(matches!(events.first(), Some(Event::ScriptActiveStart { .. })));
    assert!(matches!(events.last(), Some(Event::ScriptActiveEnd { success: true, .. })));
}

#[test]
fn a_thrown_exception_results_in_failure() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fails.lua");
    std::fs::write(&script, "error('boom')").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let result = dispatch("lua", &script, &[], dir.path(), sink.clone());

    assert!(!result.success);
    let events = sink.events.lock().unwrap();
    assert!(matches!(events.last(), Some(Event::ScriptActiveEnd { success: false, .. })));
}

#[test]
fn unrecognized_script_type_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("whatever.txt");
    std::fs::write(&script, "").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let result = dispatch("python", &script, &[], dir.path(), sink);
    assert!(!result.success);
}
