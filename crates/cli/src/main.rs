// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::error;

use remake_engine_cli::{args::Cli, logs, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logs::init_tracing(&cli);

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    if let Err(e) = logs::prepare_run_log_dir(&cli.root, &timestamp.to_string()) {
        error!(error = %e, "failed to create the CLI run-log directory");
    }

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    let code = run::run(cli, cancel).await;
    std::process::exit(code);
}
