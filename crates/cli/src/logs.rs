// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup and the eager `logs/cli/<timestamp>/` directory
//! (`spec.md` §6.4, `SPEC_FULL.md` §6.4–6.5).

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::args::Cli;

/// Initialize the global `tracing` subscriber from `--log-level`/
/// `--log-format` (env `REMAKE_LOG_LEVEL`/`REMAKE_LOG_FORMAT`), mirroring the
/// teacher's `init_tracing`. Priority: explicit flag/env over `RUST_LOG`
/// over the `info` default. Uses `try_init` so tests can call it safely more
/// than once.
pub fn init_tracing(cli: &Cli) {
    use tracing_subscriber::fmt;

    let filter = if std::env::var("REMAKE_LOG_LEVEL").is_err() && cli.log_level == "info" {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level))
    } else {
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let result = match cli.log_format.as_str() {
        "json" => fmt::fmt().with_env_filter(filter).json().try_init(),
        _ => fmt::fmt().with_env_filter(filter).try_init(),
    };
    drop(result);
}

/// Create `<root>/logs/cli/<timestamp>/` eagerly so front-ends that expect
/// the layout of `spec.md` §6.4 find it, even though this build doesn't
/// populate the per-stream log files themselves (out of scope, `spec.md`
/// §1). `timestamp` is caller-supplied since `Date.now`-style clock reads
/// aren't available to every caller (tests pass a fixed value).
pub fn prepare_run_log_dir(root: &Path, timestamp: &str) -> std::io::Result<PathBuf> {
    let dir = root.join("logs").join("cli").join(timestamp);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
