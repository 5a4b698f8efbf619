// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `download_tools` built-in action (`spec.md` §4.7).

use std::path::Path;

use super::external::ToolDownloader;
use crate::error::Result;
use crate::operation::{Operation, PromptAnswers};
use crate::value::Value;

/// Resolve the manifest path and `forceFlag`, then delegate to the
/// downloader collaborator. `forceFlag` comes from `answers["force download"]`
/// or `answers["force_download"]` (`spec.md` §4.7).
pub fn run(
    op: &Operation,
    repo_root: &Path,
    context: &Value,
    answers: &PromptAnswers,
    downloader: &dyn ToolDownloader,
) -> Result<()> {
    let manifest_name = op.tools_manifest().unwrap_or("Main.json");
    let manifest = context
        .get_path_ci("Registry_Root")
        .and_then(Value::as_str)
        .map(|root| Path::new(root).join("Tools").join(manifest_name))
        .unwrap_or_else(|| repo_root.join("EngineApps/Registries/Tools").join(manifest_name));
    let central_index = repo_root.join("EngineApps/Registries/Tools/Main.json");

    let force = answers
        .get("force download")
        .or_else(|| answers.get("force_download"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    downloader.download(&manifest, &central_index, force)
}

#[cfg(test)]
#[path = "download_tools_tests.rs"]
mod tests;
