// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide engine configuration (`spec.md` §3, `EngineConfig`).

use std::path::Path;

use tracing::warn;

use crate::value::Value;

/// Process-wide configuration map, loaded lazily from `project.json`.
///
/// Never null; malformed input degrades to an empty map rather than
/// failing the caller (`spec.md` §3 invariant).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    root: Value,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { root: Value::empty_mapping() }
    }
}

impl EngineConfig {
    /// Load `<repo_root>/project.json`. Returns an empty config (with a
    /// logged warning) if the file is missing or fails to parse.
    pub fn load(repo_root: &Path) -> Self {
        let path = repo_root.join("project.json");
        let Ok(text) = std::fs::read_to_string(&path) else {
            warn!(path = %path.display(), "project.json not found; using empty engine config");
            return Self::default();
        };
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(json) => Self { root: Value::from(json) },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "project.json malformed; using empty engine config");
                Self::default()
            }
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Case-insensitive dotted-path lookup, e.g. `"Tools.BlenderPath"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.root.get_path_ci(path)
    }

    /// A deep clone of the config as a fresh mapping, for seeding a new
    /// execution context (`spec.md` §4.2).
    pub fn seed_context(&self) -> Value {
        self.root.clone()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
