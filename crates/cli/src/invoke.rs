// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the ad hoc `ModuleInfo`/`Operation` pair for a direct
//! `--game/--script` invocation (`spec.md` §6.3) and feeds it through the
//! same execution path a run-all step uses.

use std::path::PathBuf;

use remake_engine_core::operation::{Operation, PromptAnswers};
use remake_engine_core::registry::{self, ModuleInfo};
use remake_engine_core::value::{OrderedMap, Value};

use crate::args::{parse_pairs, Cli};

/// Resolve the module an inline invocation targets: the registry's own
/// record when one exists (so installed-module placeholders still apply),
/// otherwise a synthetic record built from `--game-root`/`--game-name`.
pub fn resolve_module(cli: &Cli, repo_root: &PathBuf) -> ModuleInfo {
    let name = cli.game.clone().unwrap_or_default();

    let mut module = registry::resolve(repo_root, &name).unwrap_or_else(|| ModuleInfo {
        name: name.clone(),
        id: None,
        game_root: repo_root.join("EngineApps/Games").join(&name),
        ops_file: None,
        exe_path: None,
        title: None,
        url: None,
        is_registered: false,
        is_installed: false,
        is_built: false,
        is_unverified: true,
        is_internal: false,
    });

    if let Some(root) = &cli.game_root {
        module.game_root = root.clone();
    }
    if let Some(name) = &cli.game_name {
        module.name = name.clone();
    }
    if let Some(ops_file) = &cli.ops_file {
        module.ops_file = Some(ops_file.clone());
    }
    module
}

/// Build the operation fields an inline invocation names directly
/// (`spec.md` §6.1, §6.3): `script`/`script_type`/`args` from the dedicated
/// flags, everything else (`--set`, trailing `--key value` pairs) folded in
/// as extra fields the same way a declared operation would carry them.
pub fn build_operation(cli: &Cli) -> Operation {
    let mut fields = OrderedMap::new();

    if let Some(name) = &cli.game_name {
        fields.insert("Name".to_owned(), Value::string(name.clone()));
    }
    if let Some(script) = &cli.script {
        fields.insert("script".to_owned(), Value::string(script.clone()));
    }
    if let Some(script_type) = &cli.script_type {
        fields.insert("script_type".to_owned(), Value::string(script_type.clone()));
    }

    let args = resolve_args(cli);
    if !args.is_empty() {
        fields.insert("args".to_owned(), Value::List(args.into_iter().map(Value::string).collect()));
    }

    for (key, value) in parse_pairs(&cli.set).into_iter().chain(parse_pairs(&cli.extra)) {
        fields.insert(key, Value::string(value));
    }

    Operation::from_mapping(fields)
}

/// `--arg` entries in order, followed by `--args` parsed either as a JSON
/// array or as a comma-separated list.
fn resolve_args(cli: &Cli) -> Vec<String> {
    let mut args = cli.arg.clone();
    if let Some(raw) = &cli.args_list {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) {
            args.extend(items.into_iter().filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }));
        } else {
            args.extend(raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned));
        }
    }
    args
}

/// `--answer`/`--auto-prompt` flags pre-seed prompt answers for this one
/// invocation (`spec.md` §6.3), overriding the operation's own declared
/// defaults.
pub fn build_answers(op: &Operation, cli: &Cli) -> PromptAnswers {
    let mut answers = remake_engine_core::sequencer::derive_prompt_answers(op);
    for (key, value) in parse_pairs(&cli.answer).into_iter().chain(parse_pairs(&cli.auto_prompt)) {
        answers.insert(key, Value::string(value));
    }
    answers
}

#[cfg(test)]
#[path = "invoke_tests.rs"]
mod tests;
