// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured events (`spec.md` §3, §6.2) and the per-run Event Router
//! (`spec.md` §4.12).
//!
//! The event set is treated as an **open enum** (Design Notes §9): a
//! recognized tag decodes into a typed `Event` variant, anything else
//! decodes into `Event::Other`. The engine core never fails because of an
//! unrecognized tag — only a UI's own policy layer (out of scope here) gets
//! to treat unknowns as errors.

use serde_json::{json, Value as Json};

use crate::value::Value;

/// The fixed sentinel prefix used to frame a structured event inside a raw
/// stdout/stderr line (`spec.md` §6.2, §9: "must match bit-for-bit across
/// components"). Chosen once, here, and never duplicated at a call site.
pub const EVENT_SENTINEL: &str = "@@REMAKE_EVENT@@";

/// A structured message from a running action to the UI (`spec.md` §3).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Print { message: String, color: Option<String> },
    Prompt { message: String, id: Option<String>, secret: bool },
    ColorPrompt { message: String, color: String, id: Option<String>, secret: bool },
    Confirm { message: String, id: Option<String>, default: Option<bool> },
    Warning { message: String },
    Error { kind: String, message: String },
    Start { name: String },
    End { success: bool, exit_code: Option<i32> },
    ProgressPanelStart { id: Option<String>, total: u64, label: Option<String> },
    ProgressPanel { id: Option<String>, current: u64 },
    ProgressPanelEnd { id: Option<String> },
    ScriptActiveStart { path: String },
    ScriptProgress { id: Option<String>, current: u64, total: u64 },
    ScriptActiveEnd { success: bool, exit_code: Option<i32> },
    RunAllStart { game: String, total: usize },
    RunAllOpStart { index: usize, total: usize, name: String },
    RunAllOpEnd { index: usize, total: usize, name: String, success: bool },
    RunAllOpError { index: usize, total: usize, name: String, message: String },
    RunAllComplete { success: bool, total: usize, succeeded: usize },
    /// Any tag not covered above. `tag` preserves the wire value; `payload`
    /// is the raw JSON object.
    Other { tag: String, payload: Json },
}

impl Event {
    pub fn tag(&self) -> &str {
        match self {
            Self::Print { .. } => "print",
            Self::Prompt { .. } => "prompt",
            Self::ColorPrompt { .. } => "color_prompt",
            Self::Confirm { .. } => "confirm",
            Self::Warning { .. } => "warning",
            Self::Error { .. } => "error",
            Self::Start { .. } => "start",
            Self::End { .. } => "end",
            Self::ProgressPanelStart { .. } => "progress_panel_start",
            Self::ProgressPanel { .. } => "progress_panel",
            Self::ProgressPanelEnd { .. } => "progress_panel_end",
            Self::ScriptActiveStart { .. } => "script_active_start",
            Self::ScriptProgress { .. } => "script_progress",
            Self::ScriptActiveEnd { .. } => "script_active_end",
            Self::RunAllStart { .. } => "run-all-start",
            Self::RunAllOpStart { .. } => "run-all-op-start",
            Self::RunAllOpEnd { .. } => "run-all-op-end",
            Self::RunAllOpError { .. } => "run-all-op-error",
            Self::RunAllComplete { .. } => "run-all-complete",
            Self::Other { tag, .. } => tag,
        }
    }

    /// `true` for the two error-colored UI tags (`spec.md` §7: "Errors
    /// appear in the UI as red-colored `error` events").
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::RunAllOpError { .. })
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt { .. } | Self::ColorPrompt { .. } | Self::Confirm { .. })
    }

    /// Serialize to the JSON object carried on the wire (`event` tag field
    /// plus variant-specific payload fields).
    pub fn to_json(&self) -> Json {
        match self {
            Self::Print { message, color } => {
                json!({"event": "print", "message": message, "color": color})
            }
            Self::Prompt { message, id, secret } => {
                json!({"event": "prompt", "message": message, "id": id, "secret": secret})
            }
            Self::ColorPrompt { message, color, id, secret } => {
                json!({"event": "color_prompt", "message": message, "color": color, "id": id, "secret": secret})
            }
            Self::Confirm { message, id, default } => {
                json!({"event": "confirm", "message": message, "id": id, "default": default})
            }
            Self::Warning { message } => json!({"event": "warning", "message": message}),
            Self::Error { kind, message } => {
                json!({"event": "error", "kind": kind, "message": message})
            }
            Self::Start { name } => json!({"event": "start", "name": name}),
            Self::End { success, exit_code } => {
                json!({"event": "end", "success": success, "exit_code": exit_code})
            }
            Self::ProgressPanelStart { id, total, label } => {
                json!({"event": "progress_panel_start", "id": id, "total": total, "label": label})
            }
            Self::ProgressPanel { id, current } => {
                json!({"event": "progress_panel", "id": id, "current": current})
            }
            Self::ProgressPanelEnd { id } => json!({"event": "progress_panel_end", "id": id}),
            Self::ScriptActiveStart { path } => {
                json!({"event": "script_active_start", "path": path})
            }
            Self::ScriptProgress { id, current, total } => {
                json!({"event": "script_progress", "id": id, "current": current, "total": total})
            }
            Self::ScriptActiveEnd { success, exit_code } => {
                json!({"event": "script_active_end", "success": success, "exit_code": exit_code})
            }
            Self::RunAllStart { game, total } => {
                json!({"event": "run-all-start", "game": game, "total": total})
            }
            Self::RunAllOpStart { index, total, name } => {
                json!({"event": "run-all-op-start", "index": index, "total": total, "name": name})
            }
            Self::RunAllOpEnd { index, total, name, success } => {
                json!({"event": "run-all-op-end", "index": index, "total": total, "name": name, "success": success})
            }
            Self::RunAllOpError { index, total, name, message } => {
                json!({"event": "run-all-op-error", "index": index, "total": total, "name": name, "message": message})
            }
            Self::RunAllComplete { success, total, succeeded } => {
                json!({"event": "run-all-complete", "success": success, "total": total, "succeeded": succeeded})
            }
            Self::Other { payload, .. } => payload.clone(),
        }
    }

    /// Parse a wire-format JSON object into an `Event`; unrecognized tags
    /// decode into `Event::Other` rather than failing.
    pub fn from_json(payload: Json) -> Option<Event> {
        let tag = payload.get("event")?.as_str()?.to_owned();
        let s = |key: &str| payload.get(key).and_then(Json::as_str).map(str::to_owned);
        let opt_s = |key: &str| s(key);
        let b = |key: &str| payload.get(key).and_then(Json::as_bool);
        let u = |key: &str| payload.get(key).and_then(Json::as_u64);

        Some(match tag.as_str() {
            "print" => Event::Print { message: s("message")?, color: opt_s("color") },
            "prompt" => Event::Prompt {
                message: s("message")?,
                id: opt_s("id"),
                secret: b("secret").unwrap_or(false),
            },
            "color_prompt" => Event::ColorPrompt {
                message: s("message")?,
                color: s("color")?,
                id: opt_s("id"),
                secret: b("secret").unwrap_or(false),
            },
            "confirm" => {
                Event::Confirm { message: s("message")?, id: opt_s("id"), default: b("default") }
            }
            "warning" => Event::Warning { message: s("message")? },
            "error" => Event::Error {
                kind: opt_s("kind").unwrap_or_else(|| "Exception".to_owned()),
                message: s("message")?,
            },
            "start" => Event::Start { name: s("name")? },
            "end" => Event::End {
                success: b("success").unwrap_or(false),
                exit_code: payload.get("exit_code").and_then(Json::as_i64).map(|v| v as i32),
            },
            "progress_panel_start" => Event::ProgressPanelStart {
                id: opt_s("id"),
                total: u("total").unwrap_or(0),
                label: opt_s("label"),
            },
            "progress_panel" => {
                Event::ProgressPanel { id: opt_s("id"), current: u("current").unwrap_or(0) }
            }
            "progress_panel_end" => Event::ProgressPanelEnd { id: opt_s("id") },
            "script_active_start" => Event::ScriptActiveStart { path: s("path")? },
            "script_progress" => Event::ScriptProgress {
                id: opt_s("id"),
                current: u("current").unwrap_or(0),
                total: u("total").unwrap_or(0),
            },
            "script_active_end" => Event::ScriptActiveEnd {
                success: b("success").unwrap_or(false),
                exit_code: payload.get("exit_code").and_then(Json::as_i64).map(|v| v as i32),
            },
            "run-all-start" => {
                Event::RunAllStart { game: s("game")?, total: u("total")? as usize }
            }
            "run-all-op-start" => Event::RunAllOpStart {
                index: u("index")? as usize,
                total: u("total")? as usize,
                name: s("name")?,
            },
            "run-all-op-end" => Event::RunAllOpEnd {
                index: u("index")? as usize,
                total: u("total")? as usize,
                name: s("name")?,
                success: b("success").unwrap_or(false),
            },
            "run-all-op-error" => Event::RunAllOpError {
                index: u("index")? as usize,
                total: u("total")? as usize,
                name: s("name")?,
                message: s("message")?,
            },
            "run-all-complete" => Event::RunAllComplete {
                success: b("success").unwrap_or(false),
                total: u("total")? as usize,
                succeeded: u("succeeded")? as usize,
            },
            other => Event::Other { tag: other.to_owned(), payload },
        })
    }
}

/// The two callbacks a front-end provides to the engine (`spec.md` §4.12,
/// §6.3): raw output lines and decoded structured events.
pub trait EventSink: Send + Sync {
    fn on_output(&self, line: &str, stream: OutputStream);
    fn on_event(&self, event: &Event);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// A per-run sink that tags every event with the current game and (when
/// available) operation name before forwarding to a UI-provided sink
/// (`spec.md` §4.11 "Event routing", §4.12).
///
/// Unlike the teacher's process-wide mutable sink with save/restore, this is
/// plain data passed through call sites (Design Notes §9): no global state,
/// no restore-on-drop.
pub struct RoutedSink<'a> {
    inner: &'a dyn EventSink,
    game: String,
    operation: Option<String>,
}

impl<'a> RoutedSink<'a> {
    pub fn new(inner: &'a dyn EventSink, game: impl Into<String>) -> Self {
        Self { inner, game: game.into(), operation: None }
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn emit(&self, event: Event) {
        let mut payload = event.to_json();
        if let Json::Object(ref mut map) = payload {
            map.insert("game".to_owned(), Json::String(self.game.clone()));
            if let Some(op) = &self.operation {
                map.insert("operation".to_owned(), Json::String(op.clone()));
            }
        }
        let tagged = Event::from_json(payload).unwrap_or(event);
        self.inner.on_event(&tagged);
    }

    pub fn output(&self, line: &str, stream: OutputStream) {
        self.inner.on_output(line, stream);
    }
}

/// Value-ize an event payload for cases that need the dynamic `Value` tree
/// rather than `serde_json::Value` (e.g. handing an event to an embedded
/// script's `sdk.print` callback path).
pub fn event_payload_as_value(event: &Event) -> Value {
    Value::from(event.to_json())
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
