// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution Context Builder (`spec.md` §4.2).

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::registry::ModuleInfo;
use crate::value::{OrderedMap, Value};

/// Build a fresh execution context for one operation invocation.
///
/// Seeds with a copy of `EngineConfig`, injects built-ins (`Game_Root`,
/// `Project_Root`, `Registry_Root`, nested `Game`, nested
/// `RemakeEngine.Config`), and merges `<module.game_root>/config.toml`
/// placeholders that are not already present.
pub fn build(
    config: &EngineConfig,
    repo_root: &Path,
    module: &ModuleInfo,
) -> Result<Value> {
    let mut ctx = config.seed_context();
    if !matches!(ctx, Value::Mapping(_)) {
        ctx = Value::empty_mapping();
    }

    let project_root = repo_root.display().to_string();
    let registry_root = repo_root.join("EngineApps").display().to_string();

    ctx.insert_ci("Game_Root", Value::string(module.game_root.display().to_string()));
    ctx.insert_ci("Project_Root", Value::string(project_root.clone()));
    ctx.insert_ci("Registry_Root", Value::string(registry_root));

    let mut game = OrderedMap::new();
    game.insert("Name".to_owned(), Value::string(module.name.clone()));
    game.insert("RootPath".to_owned(), Value::string(module.game_root.display().to_string()));
    ctx.insert_ci("Game", Value::Mapping(game));

    ensure_remake_engine_config(&mut ctx, &module.game_root, &project_root);

    if let Some(module_config) = load_module_config(&module.game_root)? {
        ctx.merge_missing(&module_config);
    }

    Ok(ctx)
}

fn ensure_remake_engine_config(ctx: &mut Value, module_path: &Path, project_path: &str) {
    let mut inner = match ctx.get_ci("RemakeEngine").and_then(|v| v.as_mapping()).cloned() {
        Some(m) => m,
        None => OrderedMap::new(),
    };
    let mut sub_config = match inner.get("Config").and_then(Value::as_mapping).cloned() {
        Some(m) => m,
        None => OrderedMap::new(),
    };
    sub_config.insert("module_path".to_owned(), Value::string(module_path.display().to_string()));
    sub_config.insert("project_path".to_owned(), Value::string(project_path.to_owned()));
    inner.insert("Config".to_owned(), Value::Mapping(sub_config));
    ctx.insert_ci("RemakeEngine", Value::Mapping(inner));
}

fn load_module_config(game_root: &Path) -> Result<Option<Value>> {
    let path = game_root.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)
        .map_err(|e| EngineError::infrastructure(format!("reading {}: {e}", path.display())))?;
    let parsed: toml::Value = toml::from_str(&text)
        .map_err(|e| EngineError::infrastructure(format!("parsing {}: {e}", path.display())))?;
    Ok(Some(Value::from(parsed)))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
