// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level CLI dispatch (`spec.md` §6.3) — shared by `main` and tests so
//! exit-code behavior is exercised without spawning a process.

use std::sync::Arc;

use serde_json::Value as Json;
use tokio_util::sync::CancellationToken;
use tracing::error;

use remake_engine_core::actions::external::ExternalCollaborators;
use remake_engine_core::config::EngineConfig;
use remake_engine_core::context;
use remake_engine_core::event::{Event, EventSink, OutputStream, EVENT_SENTINEL};
use remake_engine_core::ops_loader;
use remake_engine_core::registry;
use remake_engine_core::sequencer;

use crate::args::Cli;
use crate::invoke;

/// Writes raw lines straight through and frames structured events with the
/// wire sentinel (`spec.md` §6.2), the way a real front-end spawning this
/// binary as a child would expect to parse its stdout.
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn on_output(&self, line: &str, stream: OutputStream) {
        match stream {
            OutputStream::Stdout => println!("{line}"),
            OutputStream::Stderr => eprintln!("{line}"),
        }
    }

    fn on_event(&self, event: &Event) {
        let payload: Json = event.to_json();
        println!("{EVENT_SENTINEL}{payload}");
    }
}

/// Exit codes (`spec.md` §6.3).
const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_OPTION_ERROR: i32 = 2;

pub async fn run(cli: Cli, cancel: CancellationToken) -> i32 {
    if cli.tui || cli.menu {
        println!("the interactive terminal menu is a front-end and out of scope for this engine build");
        return EXIT_SUCCESS;
    }
    if cli.gui {
        println!("the desktop UI is a front-end and out of scope for this engine build");
        return EXIT_SUCCESS;
    }

    let root = cli.root.clone();

    if cli.list_games {
        let modules = registry::scan(&root);
        for (name, info) in &modules {
            println!("- {name}  (root: {})", info.game_root.display());
        }
        return EXIT_SUCCESS;
    }

    if let Some(game) = &cli.list_ops {
        let Some(module) = registry::resolve(&root, game) else {
            eprintln!("error: unknown game '{game}'");
            return EXIT_FAILURE;
        };
        let Some(ops_file) = &module.ops_file else {
            eprintln!("error: '{game}' has no operations file");
            return EXIT_FAILURE;
        };
        match ops_loader::load(ops_file) {
            Ok(ops) => {
                for op in &ops {
                    println!("{}", op.display_name());
                }
                return EXIT_SUCCESS;
            }
            Err(e) => {
                eprintln!("error: {e}");
                return EXIT_FAILURE;
            }
        }
    }

    if cli.game.is_none() {
        eprintln!("error: expected one of --tui, --gui, --list-games, --list-ops, or --game");
        return EXIT_OPTION_ERROR;
    }

    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let config = EngineConfig::load(&root);
    let collaborators = ExternalCollaborators::unconfigured();
    let module = invoke::resolve_module(&cli, &root);

    if cli.is_inline_invocation() {
        let op = invoke::build_operation(&cli);
        let answers = invoke::build_answers(&op, &cli);

        let context = match context::build(&config, &root, &module) {
            Ok(ctx) => ctx,
            Err(e) => {
                sink.on_event(&Event::Error { kind: "ResolutionError".to_owned(), message: e.message().to_owned() });
                error!(error = %e, "failed to build execution context");
                return EXIT_FAILURE;
            }
        };

        let success =
            sequencer::execute(&op, &root, &context, &answers, sink, cancel, &collaborators, None).await;
        return if success { EXIT_SUCCESS } else { EXIT_FAILURE };
    }

    if module.ops_file.is_none() {
        eprintln!("error: unknown game '{}'", module.name);
        return EXIT_FAILURE;
    }

    match sequencer::run_all(&module, &root, &config, sink, cancel, &collaborators, None).await {
        Ok(result) => {
            if result.success {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
