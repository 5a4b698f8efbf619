// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Parser;

/// Operation orchestrator for game-asset remake pipelines.
#[derive(Debug, Parser)]
#[command(name = "remake-engine", version, about)]
pub struct Cli {
    /// Repository root the engine operates against.
    #[arg(long, env = "REMAKE_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Launch the interactive terminal menu (front-end, out of scope here).
    #[arg(long)]
    pub tui: bool,
    #[arg(long)]
    pub menu: bool,
    /// Launch the desktop UI (front-end, out of scope here).
    #[arg(long)]
    pub gui: bool,

    /// Print every known module.
    #[arg(long = "list-games", alias = "list_games")]
    pub list_games: bool,
    /// List the operations declared for one module.
    #[arg(long = "list-ops", alias = "list_ops", value_name = "GAME")]
    pub list_ops: Option<String>,

    /// Module name (aliases mirror the names real front-ends have used).
    #[arg(long, alias = "game_module", alias = "module", alias = "gameid")]
    pub game: Option<String>,
    /// Override the module's on-disk root instead of resolving it from the
    /// registry.
    #[arg(long = "game-root", alias = "game_root")]
    pub game_root: Option<PathBuf>,
    /// Override the module's display name for this invocation.
    #[arg(long = "game-name", alias = "game_name")]
    pub game_name: Option<String>,
    /// Load operations from this file instead of the module's own.
    #[arg(long = "ops-file", alias = "ops_file")]
    pub ops_file: Option<PathBuf>,

    /// Script path or built-in action verb to invoke directly.
    #[arg(long)]
    pub script: Option<String>,
    /// Execution mode (`engine`, `lua`, `js`, `bms`); `lau` and `type` alias
    /// the field name and value the same way the operations loader does.
    #[arg(long = "script-type", alias = "script_type", alias = "type")]
    pub script_type: Option<String>,

    /// Positional argument for the invoked script (repeatable).
    #[arg(long = "arg")]
    pub arg: Vec<String>,
    /// A whole argument list, as a JSON array or a comma-separated string.
    #[arg(long = "args")]
    pub args_list: Option<String>,
    /// Pre-seed a prompt's answer (`KEY=VALUE`, repeatable).
    #[arg(long = "answer")]
    pub answer: Vec<String>,
    /// Pre-seed a response to an interactive prompt raised mid-run
    /// (`ID=RESPONSE`, repeatable).
    #[arg(long = "auto-prompt", alias = "auto_prompt")]
    pub auto_prompt: Vec<String>,
    /// Set an arbitrary operation field (`KEY=VALUE`, repeatable).
    #[arg(long)]
    pub set: Vec<String>,

    #[arg(long = "log-format", env = "REMAKE_LOG_FORMAT", default_value = "json")]
    pub log_format: String,
    #[arg(long = "log-level", env = "REMAKE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Arbitrary trailing `--key value` pairs, collected into extra
    /// operation fields (`spec.md` §6.3), passed after a literal `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl Cli {
    /// `spec.md` §6.3: a command is a direct operation invocation when it
    /// names both a module and a script.
    pub fn is_inline_invocation(&self) -> bool {
        self.game.is_some() && self.script.is_some()
    }
}

/// Parse a repeatable `KEY=VALUE` flag list into pairs, skipping malformed
/// entries rather than failing the whole invocation over one typo.
pub fn parse_pairs(items: &[String]) -> Vec<(String, String)> {
    items
        .iter()
        .filter_map(|item| item.split_once('=').map(|(k, v)| (k.to_owned(), v.to_owned())))
        .collect()
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
