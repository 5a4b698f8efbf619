// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded Action Dispatcher (`spec.md` §4.6): routes `lua`/`js` scripts to
//! their respective interpreters with the SDK surface bound in.

pub mod js;
pub mod lua;

use std::path::Path;
use std::sync::Arc;

use crate::event::EventSink;
use crate::sdk::Sdk;

/// Result of running an embedded script.
pub struct DispatchResult {
    pub success: bool,
}

/// Run `script_path` under the named `script_type` ("lua" or "js"),
/// with `argv` bound as the script's positional arguments.
pub fn dispatch(
    script_type: &str,
    script_path: &Path,
    argv: &[String],
    repo_root: &Path,
    sink: Arc<dyn EventSink>,
) -> DispatchResult {
    let sdk = Sdk::new(repo_root, sink.clone());
    sdk.script_active_start(&script_path.to_string_lossy());

    let outcome = match script_type {
        "lua" => lua::run(script_path, argv, &sdk),
        "js" => js::run(script_path, argv, &sdk, repo_root),
        other => Err(format!("dispatch: unrecognized embedded script_type '{other}'")),
    };

    let success = outcome.is_ok();
    if let Err(message) = &outcome {
        sink.on_event(&crate::event::Event::Error {
            kind: "Exception".to_owned(),
            message: message.clone(),
        });
    }
    sdk.script_active_end(success, if success { Some(0) } else { Some(1) });
    DispatchResult { success }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
