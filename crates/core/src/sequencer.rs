// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-All Sequencer (`spec.md` §4.11): selects a module's `init`/`run-all`
//! operations, derives prompt defaults for each, and runs them in order
//! through either the embedded action dispatcher or the Process Supervisor.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value as Json;
use tokio_util::sync::CancellationToken;

use crate::actions::external::ExternalCollaborators;
use crate::actions;
use crate::command::{self, BuiltCommand};
use crate::config::EngineConfig;
use crate::context;
use crate::dispatch;
use crate::error::Result;
use crate::event::{Event, EventSink, OutputStream};
use crate::operation::{Operation, Prompt, PromptAnswers, ScriptType};
use crate::registry::ModuleInfo;
use crate::value::Value;

/// Outcome of running every selected operation for a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunAllResult {
    pub success: bool,
    pub total: usize,
    pub succeeded: usize,
}

/// Select `init`-flagged operations (declaration order), then append
/// `run-all`/`run_all`-flagged operations not already selected, falling
/// back to the full list when nothing matched (`spec.md` §4.11 "Selection").
fn select(ops: &[Operation]) -> Vec<usize> {
    let mut selected: Vec<usize> = ops.iter().enumerate().filter(|(_, op)| op.is_init()).map(|(i, _)| i).collect();
    for (i, op) in ops.iter().enumerate() {
        if op.is_run_all() && !selected.contains(&i) {
            selected.push(i);
        }
    }
    if selected.is_empty() {
        (0..ops.len()).collect()
    } else {
        selected
    }
}

/// Derive prompt-default answers for `op`, independent of any I/O
/// (`spec.md` §4.11 "Prompt defaults", §4.11a). Condition-gated prompts
/// whose target hasn't resolved yet are evaluated using the target's own
/// default as a prefetch.
pub fn derive_prompt_answers(op: &Operation) -> PromptAnswers {
    let prompts = op.prompts();
    let mut answers = PromptAnswers::new();

    fn resolve_condition(answers: &PromptAnswers, prompts: &[Prompt], name: &str) -> bool {
        if let Some(answer) = answers.get(name) {
            return answer.as_bool().unwrap_or(false);
        }
        prompts
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(|p| p.default.as_ref())
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    for prompt in &prompts {
        let value = match &prompt.condition {
            Some(target) if !resolve_condition(&answers, &prompts, target) => prompt.prompt_type.empty_value(),
            _ => prompt.default.clone().unwrap_or_else(|| prompt.prompt_type.empty_value()),
        };
        answers.insert(prompt.name.clone(), value);
    }

    answers
}

/// Tags every event with `game` and `operation` before forwarding to the
/// UI-provided sink (`spec.md` §4.11 "Event routing"). Owns an `Arc` rather
/// than borrowing so it satisfies the `'static` bound the embedded
/// dispatcher's host closures require.
struct RunAllSink {
    inner: Arc<dyn EventSink>,
    game: String,
    operation: String,
}

impl EventSink for RunAllSink {
    fn on_output(&self, line: &str, stream: OutputStream) {
        self.inner.on_output(line, stream);
    }

    fn on_event(&self, event: &Event) {
        let mut payload = event.to_json();
        if let Json::Object(ref mut map) = payload {
            map.insert("game".to_owned(), Json::String(self.game.clone()));
            map.insert("operation".to_owned(), Json::String(self.operation.clone()));
        }
        let tagged = Event::from_json(payload).unwrap_or_else(|| event.clone());
        self.inner.on_event(&tagged);
    }
}

/// Run every selected operation of `module` in order (`spec.md` §4.11
/// "Execution"). Cancellation stops the loop immediately and marks overall
/// success `false`.
pub async fn run_all(
    module: &ModuleInfo,
    repo_root: &Path,
    config: &EngineConfig,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
    collaborators: &ExternalCollaborators<'_>,
    quickbms_path: Option<&str>,
) -> Result<RunAllResult> {
    let ops_file = module
        .ops_file
        .clone()
        .ok_or_else(|| crate::error::EngineError::resolution("module has no operations file"))?;
    let ops = crate::ops_loader::load(&ops_file)?;
    let selected = select(&ops);
    let total = selected.len();

    sink.on_event(&Event::RunAllStart { game: module.name.clone(), total });

    let mut succeeded = 0usize;
    let mut success = true;

    for (pos, &index) in selected.iter().enumerate() {
        if cancel.is_cancelled() {
            success = false;
            break;
        }

        let op = &ops[index];
        let name = op.display_name();
        sink.on_event(&Event::RunAllOpStart { index: pos, total, name: name.clone() });

        let answers = derive_prompt_answers(op);
        let op_success = run_one(op, module, repo_root, config, sink.clone(), cancel.clone(), collaborators, quickbms_path, &name).await;

        if op_success {
            succeeded += 1;
        } else {
            success = false;
        }
        sink.on_event(&Event::RunAllOpEnd { index: pos, total, name, success: op_success });
    }

    sink.on_event(&Event::RunAllComplete { success, total, succeeded });
    Ok(RunAllResult { success, total, succeeded })
}

/// Run a single operation through whichever backend its `script_type` names
/// (`spec.md` §4.11 "Execution", reused by the CLI's inline-invocation path
/// in §6.3 so a one-off `--game/--script` call takes the same route as a
/// run-all step).
pub async fn run_one(
    op: &Operation,
    module: &ModuleInfo,
    repo_root: &Path,
    config: &EngineConfig,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
    collaborators: &ExternalCollaborators<'_>,
    quickbms_path: Option<&str>,
    name: &str,
) -> bool {
    let routed: Arc<dyn EventSink> =
        Arc::new(RunAllSink { inner: sink, game: module.name.clone(), operation: name.to_owned() });

    let context = match context::build(config, repo_root, module) {
        Ok(ctx) => ctx,
        Err(e) => {
            routed.on_event(&Event::Error { kind: "ResolutionError".to_owned(), message: e.message().to_owned() });
            return false;
        }
    };
    let answers = derive_prompt_answers(op);

    execute(op, repo_root, &context, &answers, routed, cancel, collaborators, quickbms_path).await
}

/// Dispatch one already-resolved `(op, context, answers)` triple to whichever
/// backend its `script_type` names (`spec.md` §4.11 "Execution"). Shared by
/// [`run_one`] and the CLI's inline-invocation path (`spec.md` §6.3), which
/// supplies its own `answers` built from `--answer`/`--auto-prompt` flags
/// instead of [`derive_prompt_answers`]'s automatic defaults.
pub async fn execute(
    op: &Operation,
    repo_root: &Path,
    context: &Value,
    answers: &PromptAnswers,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
    collaborators: &ExternalCollaborators<'_>,
    quickbms_path: Option<&str>,
) -> bool {
    match op.script_type() {
        Some(ScriptType::Engine) => actions::run(op, repo_root, context, answers, sink, collaborators),
        Some(ScriptType::Lua) | Some(ScriptType::Js) => {
            let script_type = if op.script_type() == Some(ScriptType::Lua) { "lua" } else { "js" };
            match command::build(op, context, answers, quickbms_path) {
                Ok(BuiltCommand::Embedded { script_path, args, .. }) => {
                    dispatch::dispatch(script_type, Path::new(&script_path), &args, repo_root, sink).success
                }
                _ => false,
            }
        }
        _ => match command::build(op, context, answers, quickbms_path) {
            Ok(BuiltCommand::External { argv }) => {
                crate::process::run(&argv, &HashMap::new(), sink.as_ref(), None, cancel).await
            }
            _ => false,
        },
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod tests;
