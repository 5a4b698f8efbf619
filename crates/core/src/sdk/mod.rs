// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded SDK Surface (`spec.md` §4.5): the host functions exposed under
//! a global `sdk` namespace to Lua/JS scripts (`dispatch` module wires
//! these into each language's binding layer).

pub mod allowlist;
pub mod archive;
pub mod fs;
pub mod sqlite;
pub mod toml_io;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::event::{Event, EventSink, OutputStream};
use crate::process;
use crate::value::Value;

use allowlist::PathAllowlist;

/// One call-scoped handle to the SDK, shared by whichever language binding
/// is driving the current embedded script (`spec.md` §4.6). `Arc`-backed so
/// it can be cloned into the `'static` closures the Lua/JS interpreters
/// require for their host bindings.
#[derive(Clone)]
pub struct Sdk {
    pub allowlist: Arc<PathAllowlist>,
    sink: Arc<dyn EventSink>,
}

impl Sdk {
    pub fn new(repo_root: &Path, sink: Arc<dyn EventSink>) -> Self {
        Self { allowlist: Arc::new(PathAllowlist::new(repo_root)), sink }
    }

    pub fn print(&self, message: &str, color: Option<&str>) {
        self.sink
            .on_event(&Event::Print { message: message.to_owned(), color: color.map(str::to_owned) });
    }

    pub fn color_print(&self, color: &str, message: &str) {
        self.print(message, Some(color));
    }

    pub fn warn(&self, message: &str) {
        self.sink.on_event(&Event::Warning { message: message.to_owned() });
    }

    pub fn error(&self, message: &str) {
        self.sink
            .on_event(&Event::Error { kind: "Exception".to_owned(), message: message.to_owned() });
    }

    /// `prompt`/`color_prompt`/`confirm` are relayed to the UI via an event;
    /// the actual answer arrives out-of-band through the process's stdin
    /// pump (`spec.md` §4.4) when the SDK call originates from a spawned
    /// child, or via `answer` directly when called in-process.
    pub fn prompt_event(&self, message: &str, id: Option<&str>, secret: bool) -> Event {
        let event = Event::Prompt { message: message.to_owned(), id: id.map(str::to_owned), secret };
        self.sink.on_event(&event);
        event
    }

    pub fn confirm_event(&self, message: &str, id: Option<&str>, default: Option<bool>) -> Event {
        let event = Event::Confirm { message: message.to_owned(), id: id.map(str::to_owned), default };
        self.sink.on_event(&event);
        event
    }

    pub fn progress_panel_start(&self, id: Option<&str>, total: u64, label: Option<&str>) {
        self.sink.on_event(&Event::ProgressPanelStart {
            id: id.map(str::to_owned),
            total,
            label: label.map(str::to_owned),
        });
    }

    pub fn progress_panel(&self, id: Option<&str>, current: u64) {
        self.sink.on_event(&Event::ProgressPanel { id: id.map(str::to_owned), current });
    }

    pub fn progress_panel_end(&self, id: Option<&str>) {
        self.sink.on_event(&Event::ProgressPanelEnd { id: id.map(str::to_owned) });
    }

    pub fn script_active_start(&self, path: &str) {
        self.sink.on_event(&Event::ScriptActiveStart { path: path.to_owned() });
    }

    pub fn script_active_end(&self, success: bool, exit_code: Option<i32>) {
        self.sink.on_event(&Event::ScriptActiveEnd { success, exit_code });
    }

    /// Request interactive approval of a denied path's containing
    /// directory (`spec.md` §4.5 "Interactive approval"). Returns the
    /// decision supplied by `answer`.
    pub fn request_path_approval(&self, denied: &Path, answer: bool) -> bool {
        let root = denied.parent().unwrap_or(denied);
        self.sink.on_event(&Event::ColorPrompt {
            message: format!("Grant access to {}?", root.display()),
            color: "yellow".to_owned(),
            id: None,
            secret: false,
        });
        if answer {
            self.allowlist.approve(root);
            true
        } else {
            self.sink.on_event(&Event::Error {
                kind: "Exception".to_owned(),
                message: format!("access to {} was not granted", root.display()),
            });
            false
        }
    }

    /// `run_process` (`spec.md` §4.5): subject to the same executable
    /// allow-list as the Process Supervisor. Blocks the calling (scripting)
    /// thread until the child exits or `timeout_ms` elapses.
    pub fn run_process(
        &self,
        argv: &[String],
        env: HashMap<String, String>,
        timeout_ms: Option<u64>,
    ) -> RunProcessResult {
        let sink = self.sink.clone();
        let future = async move {
            let cancel = tokio_util::sync::CancellationToken::new();
            if let Some(ms) = timeout_ms {
                let cancel2 = cancel.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                    cancel2.cancel();
                });
            }
            process::run(argv, &env, &*sink, None, cancel).await
        };

        let success = match tokio::runtime::Handle::try_current() {
            Ok(handle) => tokio::task::block_in_place(|| handle.block_on(future)),
            Err(_) => match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(future),
                Err(e) => {
                    self.sink.on_event(&Event::Error {
                        kind: "Exception".to_owned(),
                        message: format!("failed to start a runtime for run_process: {e}"),
                    });
                    false
                }
            },
        };
        RunProcessResult { success, exit_code: if success { Some(0) } else { None } }
    }

    pub fn sha1_file(&self, path: &Path) -> Result<String> {
        fs::sha1_file(&self.allowlist, path)
    }

    pub fn md5(&self, text: &str) -> String {
        fs::md5(text)
    }

    pub fn toml_read_file(&self, path: &Path) -> Result<Value> {
        toml_io::toml_read_file(&self.allowlist, path)
    }

    pub fn toml_write_file(&self, path: &Path, value: &Value) -> Result<bool> {
        toml_io::toml_write_file(&self.allowlist, path, value)
    }

    pub fn extract_archive(&self, src: &Path, dst: &Path) -> Result<bool> {
        archive::extract_archive(&self.allowlist, src, dst)
    }

    pub fn create_archive(&self, src: &Path, dst: &Path, format: &str) -> Result<bool> {
        archive::create_archive(&self.allowlist, src, dst, format)
    }
}

pub struct RunProcessResult {
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// No-op sink used by tests and by `run_process` callers that don't need
/// to observe the child's raw output, only its boolean result.
pub struct SilentSink;

impl EventSink for SilentSink {
    fn on_output(&self, _line: &str, _stream: OutputStream) {}
    fn on_event(&self, _event: &Event) {}
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
