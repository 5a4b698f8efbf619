// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in Engine Actions (`spec.md` §4.7): `script_type = "engine"`
//! dispatches on `op.script` to one of five built-ins, then recursively
//! invokes any `onsuccess`/`on_success` children on success.

pub mod download_tools;
pub mod external;
pub mod format_convert;
pub mod format_extract;
pub mod rename_folders;
pub mod validate_files;

use std::path::Path;
use std::sync::Arc;

use crate::error::EngineError;
use crate::event::{Event, EventSink};
use crate::operation::{Operation, PromptAnswers};
use crate::placeholder;
use crate::sdk::Sdk;
use crate::value::Value;
use external::ExternalCollaborators;

/// Run the engine action named by `op.script`, then cascade into
/// `op.onsuccess`/`op.on_success` children on success (`spec.md` §4.7).
/// Returns overall success, including the cascade.
pub fn run(
    op: &Operation,
    repo_root: &Path,
    context: &Value,
    answers: &PromptAnswers,
    sink: Arc<dyn EventSink>,
    collaborators: &ExternalCollaborators,
) -> bool {
    let merged = merge_context_with_answers(context, answers);
    let resolved_args: Vec<String> = op
        .args()
        .iter()
        .map(|v| placeholder::resolve(&merged, v))
        .map(|v| v.as_str().map(str::to_owned).unwrap_or_else(|| stringify(&v)))
        .collect();

    let action = op.script().unwrap_or_default();
    let outcome = match action {
        "download_tools" => {
            download_tools::run(op, repo_root, &merged, answers, collaborators.downloader)
        }
        "format-extract" => {
            format_extract::run(op, &resolved_args, sink.as_ref()).map(|_count| ())
        }
        "format-convert" => {
            let sdk = Sdk::new(repo_root, sink.clone());
            format_convert::run(op, &resolved_args, &sdk).and_then(|ok| {
                if ok {
                    Ok(())
                } else {
                    Err(EngineError::recoverable("format-convert: child process failed"))
                }
            })
        }
        "validate-files" => validate_files::run(op, &resolved_args, collaborators.validator),
        "rename-folders" => rename_folders::run(&resolved_args, collaborators.renamer),
        other => Err(EngineError::resolution(format!("unknown engine action '{other}'"))),
    };

    let success = match outcome {
        Ok(()) => true,
        Err(e) => {
            sink.on_event(&Event::Error { kind: error_kind(&e), message: e.message().to_owned() });
            false
        }
    };

    if !success {
        return false;
    }

    for child in op.on_success() {
        if !run(&child, repo_root, context, answers, sink.clone(), collaborators) {
            return false;
        }
    }
    true
}

fn error_kind(e: &EngineError) -> String {
    match e {
        EngineError::Resolution(_) => "ResolutionError",
        EngineError::Recoverable(_) => "Exception",
        EngineError::Fatal(_) => "Exception",
        EngineError::Infrastructure(_) => "InfrastructureError",
        EngineError::Unsupported(_) => "UnsupportedError",
    }
    .to_owned()
}

fn stringify(v: &Value) -> String {
    match v {
        Value::Scalar(s) => s.stringify(),
        Value::List(_) | Value::Mapping(_) => {
            serde_json::to_string(&serde_json::Value::from(v.clone())).unwrap_or_default()
        }
    }
}

fn merge_context_with_answers(context: &Value, answers: &PromptAnswers) -> Value {
    let mut merged = context.clone();
    merged.insert_ci("PromptAnswers", answers.as_value());
    merged
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
