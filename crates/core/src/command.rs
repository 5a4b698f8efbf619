// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Builder (`spec.md` §4.3): turns an operation record + resolved
//! context + prompt answers into either an argv for external execution or a
//! normalized embedded-execution request.

use crate::error::{EngineError, Result};
use crate::operation::{Operation, PromptAnswers, ScriptType};
use crate::placeholder;
use crate::value::Value;

/// A resolved command, ready for the Process Supervisor or the Embedded
/// Action Dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltCommand {
    /// `argv[0]` is the executable; the remainder are its arguments.
    External { argv: Vec<String> },
    /// Embedded execution: script path plus resolved positional args.
    Embedded { script_type: ScriptType, script_path: String, args: Vec<String> },
}

/// Build the command for `op` given the resolved execution `context` and
/// the caller's `answers`. Placeholders in `op.script` and every element of
/// `op.args` are resolved first; `{{PromptAnswers.<Name>}}` tokens resolve
/// against `answers`.
pub fn build(
    op: &Operation,
    context: &Value,
    answers: &PromptAnswers,
    quickbms_path: Option<&str>,
) -> Result<BuiltCommand> {
    let merged = merge_context_with_answers(context, answers);

    let script_type = op
        .script_type()
        .ok_or_else(|| EngineError::resolution("operation has no recognized script_type"))?;

    let resolved_script = op
        .script()
        .map(|s| resolve_scalar(&merged, s))
        .ok_or_else(|| EngineError::resolution("operation has no script"))?;

    let resolved_args: Vec<String> = op
        .args()
        .iter()
        .map(|v| placeholder::resolve(&merged, v))
        .map(|v| v.as_str().map(str::to_owned).unwrap_or_else(|| v.to_string_lossy()))
        .collect();

    match script_type {
        ScriptType::Python => {
            Err(EngineError::unsupported("script_type 'python' is not supported"))
        }
        ScriptType::Bms => {
            let quickbms = quickbms_path
                .ok_or_else(|| EngineError::resolution("no quickbms path configured"))?;
            let input = op
                .input()
                .map(|s| resolve_scalar(&merged, s))
                .ok_or_else(|| EngineError::resolution("operation has no input"))?;
            let output = op
                .output()
                .map(|s| resolve_scalar(&merged, s))
                .ok_or_else(|| EngineError::resolution("operation has no output"))?;
            let argv = vec![quickbms.to_owned(), resolved_script, input, output];
            Ok(BuiltCommand::External { argv })
        }
        ScriptType::Engine | ScriptType::Lua | ScriptType::Js => {
            Ok(BuiltCommand::Embedded { script_type, script_path: resolved_script, args: resolved_args })
        }
    }
}

fn resolve_scalar(context: &Value, s: &str) -> String {
    let resolved = placeholder::resolve(context, &Value::string(s));
    resolved.as_str().map(str::to_owned).unwrap_or_else(|| s.to_owned())
}

fn merge_context_with_answers(context: &Value, answers: &PromptAnswers) -> Value {
    let mut merged = context.clone();
    merged.insert_ci("PromptAnswers", answers.as_value());
    merged
}

trait ToStringLossy {
    fn to_string_lossy(&self) -> String;
}

impl ToStringLossy for Value {
    fn to_string_lossy(&self) -> String {
        match self {
            Value::Scalar(s) => s.stringify(),
            Value::List(_) | Value::Mapping(_) => {
                serde_json::to_string(&serde_json::Value::from(self.clone())).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
