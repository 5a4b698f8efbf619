// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use super::*;
use crate::registry::ModuleInfo;

fn module(game_root: PathBuf) -> ModuleInfo {
    ModuleInfo {
        name: "demo".to_owned(),
        id: None,
        game_root,
        ops_file: None,
        exe_path: None,
        title: None,
        url: None,
        is_registered: false,
        is_installed: true,
        is_built: false,
        is_unverified: true,
        is_internal: false,
    }
}

#[test]
fn injects_built_in_paths_and_game_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let repo_root = dir.path();
    let game_root = repo_root.join("EngineApps/Games/demo");
    std::fs::create_dir_all(&game_root).unwrap();

    let config = EngineConfig::default();
    let module = module(game_root.clone());
    let ctx = build(&config, repo_root, &module).unwrap();

    assert_eq!(
        ctx.get_path_ci("Game_Root").and_then(Value::as_str),
        Some(game_root.display().to_string().as_str())
    );
    assert_eq!(
        ctx.get_path_ci("Project_Root").and_then(Value::as_str),
        Some(repo_root.display().to_string().as_str())
    );
    assert_eq!(ctx.get_path_ci("Game.Name").and_then(Value::as_str), Some("demo"));
    assert_eq!(
        ctx.get_path_ci("RemakeEngine.Config.module_path").and_then(Value::as_str),
        Some(game_root.display().to_string().as_str())
    );
}

#[test]
fn outer_context_wins_over_module_config_toml() {
    let dir = tempfile::tempdir().unwrap();
    let repo_root = dir.path();
    let game_root = repo_root.join("EngineApps/Games/demo");
    std::fs::create_dir_all(&game_root).unwrap();
    std::fs::write(
        game_root.join("config.toml"),
        "Game_Root = \"should-not-override\"\nExtra_Key = \"from module\"\n",
    )
    .unwrap();

    let config = EngineConfig::default();
    let module = module(game_root.clone());
    let ctx = build(&config, repo_root, &module).unwrap();

    assert_eq!(
        ctx.get_path_ci("Game_Root").and_then(Value::as_str),
        Some(game_root.display().to_string().as_str())
    );
    assert_eq!(ctx.get_path_ci("Extra_Key").and_then(Value::as_str), Some("from module"));
}

#[test]
fn missing_module_config_toml_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo_root = dir.path();
    let game_root = repo_root.join("EngineApps/Games/demo");
    std::fs::create_dir_all(&game_root).unwrap();

    let config = EngineConfig::default();
    let module = module(game_root);
    assert!(build(&config, repo_root, &module).is_ok());
}
