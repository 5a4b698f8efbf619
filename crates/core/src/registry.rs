// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module Scanner & Registry (`spec.md` §4.9).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

/// A game/module known to the engine (`spec.md` §3, `ModuleInfo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub id: Option<String>,
    pub game_root: PathBuf,
    pub ops_file: Option<PathBuf>,
    pub exe_path: Option<PathBuf>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub is_registered: bool,
    pub is_installed: bool,
    pub is_built: bool,
    pub is_unverified: bool,
    pub is_internal: bool,
}

impl ModuleInfo {
    fn new(name: impl Into<String>, game_root: PathBuf) -> Self {
        Self {
            name: name.into(),
            id: None,
            game_root,
            ops_file: None,
            exe_path: None,
            title: None,
            url: None,
            is_registered: false,
            is_installed: false,
            is_built: false,
            is_unverified: false,
            is_internal: false,
        }
    }
}

/// Filter modes for presenting the registry to a front-end (`spec.md` §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    All,
    Installed,
    Uninstalled,
    Unverified,
    Registered,
    Built,
}

impl FilterMode {
    pub fn matches(self, m: &ModuleInfo) -> bool {
        match self {
            Self::All => true,
            Self::Installed => m.is_installed,
            Self::Uninstalled => !m.is_installed,
            Self::Unverified => m.is_unverified,
            Self::Registered => m.is_registered,
            Self::Built => m.is_built,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CentralIndexEntry {
    #[serde(default)]
    id: Option<String>,
    path: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GameToml {
    #[serde(default)]
    exe: Option<String>,
    #[serde(default)]
    executable: Option<String>,
}

const OPS_FILE_CANDIDATES: [&str; 2] = ["operations.toml", "operations.json"];

fn find_ops_file(dir: &Path) -> Option<PathBuf> {
    OPS_FILE_CANDIDATES.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// Scan the repository root and produce a `Name -> ModuleInfo` map, merging
/// the central registered-modules index, on-disk installed/built discovery,
/// and standalone ops modules, in that order (`spec.md` §4.9).
pub fn scan(repo_root: &Path) -> BTreeMap<String, ModuleInfo> {
    let mut modules: IndexMap<String, ModuleInfo> = IndexMap::new();

    // 1. Central registered-modules index.
    let index_path = repo_root.join("EngineApps/Registries/Tools/Main.json");
    if let Ok(text) = std::fs::read_to_string(&index_path) {
        match serde_json::from_str::<BTreeMap<String, CentralIndexEntry>>(&text) {
            Ok(entries) => {
                for (name, entry) in entries {
                    let game_root = PathBuf::from(&entry.path);
                    let mut info = ModuleInfo::new(&name, game_root.clone());
                    info.id = entry.id;
                    info.url = entry.url;
                    info.title = entry.title;
                    info.is_registered = true;
                    info.ops_file = find_ops_file(&game_root);
                    modules.insert(name, info);
                }
            }
            Err(e) => warn!(path = %index_path.display(), error = %e, "malformed central module index"),
        }
    }

    // 2. On-disk installed discovery.
    let games_dir = repo_root.join("EngineApps/Games");
    if let Ok(entries) = std::fs::read_dir(&games_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
            let Some(ops_file) = find_ops_file(&path) else { continue };

            let info = modules.entry(name.to_owned()).or_insert_with(|| ModuleInfo::new(name, path.clone()));
            info.is_installed = true;
            if info.ops_file.is_none() {
                info.ops_file = Some(ops_file);
            }

            // 3. On-disk built discovery.
            let game_toml_path = path.join("game.toml");
            if let Ok(text) = std::fs::read_to_string(&game_toml_path) {
                if let Ok(parsed) = toml::from_str::<GameToml>(&text) {
                    let exe = parsed.exe.or(parsed.executable);
                    if let Some(exe) = exe {
                        let exe_path = path.join(&exe);
                        if exe_path.is_file() {
                            info.is_built = true;
                            info.exe_path = Some(exe_path);
                        }
                    }
                }
            }
        }
    }

    // 4. Standalone ops modules.
    let standalone_dir = repo_root.join("EngineApps/Registries/ops");
    if let Ok(entries) = std::fs::read_dir(&standalone_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned) else { continue };
            let mut info = ModuleInfo::new(stem.clone(), repo_root.to_path_buf());
            info.ops_file = Some(path);
            info.is_internal = true;
            info.is_installed = true;
            info.is_registered = true;
            modules.insert(stem, info);
        }
    }

    // Final pass: unverified = installed and not registered.
    for info in modules.values_mut() {
        info.is_unverified = info.is_installed && !info.is_registered;
    }

    modules.into_iter().collect()
}

/// Resolve one module by name, scanning the registry fresh (`spec.md` §3:
/// "no persistent in-memory cache between runs").
pub fn resolve(repo_root: &Path, name: &str) -> Option<ModuleInfo> {
    scan(repo_root).remove(name)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
