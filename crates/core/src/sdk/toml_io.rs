// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `toml_read_file` / `toml_write_file` (`spec.md` §4.5).

use std::path::Path;

use super::allowlist::PathAllowlist;
use crate::error::{EngineError, Result};
use crate::value::Value;

pub fn toml_read_file(allowlist: &PathAllowlist, path: &Path) -> Result<Value> {
    if !allowlist.is_allowed(path) {
        return Err(EngineError::resolution(format!("path not allow-listed: {}", path.display())));
    }
    let text =
        std::fs::read_to_string(path).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    let parsed: toml::Value =
        toml::from_str(&text).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    Ok(parsed.into())
}

pub fn toml_write_file(allowlist: &PathAllowlist, path: &Path, value: &Value) -> Result<bool> {
    if !allowlist.is_allowed(path) {
        return Err(EngineError::resolution(format!("path not allow-listed: {}", path.display())));
    }
    let toml_value: toml::Value = value.clone().into();
    let text =
        toml::to_string_pretty(&toml_value).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    }
    std::fs::write(path, text)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

#[cfg(test)]
#[path = "toml_io_tests.rs"]
mod tests;
