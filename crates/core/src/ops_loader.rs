// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations Loader (`spec.md` §4.10): parses an operations file in either
//! of two accepted dialects into a flat, ordered list of `Operation`s.

use std::path::Path;

use crate::error::{EngineError, Result};
use crate::operation::Operation;
use crate::value::Value;

/// Load and flatten an operations file. Dialect is inferred from the file
/// extension (`.toml` or `.json`).
pub fn load(path: &Path) -> Result<Vec<Operation>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| EngineError::infrastructure(format!("reading {}: {e}", path.display())))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => load_toml(&text, path),
        Some("json") => load_json(&text, path),
        _ => Err(EngineError::infrastructure(format!(
            "unrecognized operations file extension: {}",
            path.display()
        ))),
    }
}

/// TOML dialect: top-level tables whose values are arrays-of-tables are
/// ordered groups; each inner table is one operation. Group order and
/// within-group order both follow declaration order.
fn load_toml(text: &str, path: &Path) -> Result<Vec<Operation>> {
    let doc: toml::Value = toml::from_str(text)
        .map_err(|e| EngineError::infrastructure(format!("parsing {}: {e}", path.display())))?;
    let toml::Value::Table(table) = doc else {
        return Err(EngineError::infrastructure(format!(
            "{}: expected a top-level table",
            path.display()
        )));
    };

    let mut operations = Vec::new();
    for (_group_name, group_value) in table {
        let toml::Value::Array(entries) = group_value else { continue };
        for entry in entries {
            let toml::Value::Table(_) = &entry else { continue };
            let value: Value = entry.into();
            if let Some(mapping) = value.as_mapping() {
                operations.push(Operation::from_mapping(mapping.clone()));
            }
        }
    }
    Ok(operations)
}

/// JSON dialect: either a top-level array (flat list) or a top-level object
/// whose values are arrays (grouped; flattened preserving group order).
fn load_json(text: &str, path: &Path) -> Result<Vec<Operation>> {
    let doc: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| EngineError::infrastructure(format!("parsing {}: {e}", path.display())))?;

    let mut operations = Vec::new();
    match doc {
        serde_json::Value::Array(items) => {
            for item in items {
                push_operation(&mut operations, item);
            }
        }
        serde_json::Value::Object(groups) => {
            for (_group_name, group_value) in groups {
                let serde_json::Value::Array(items) = group_value else { continue };
                for item in items {
                    push_operation(&mut operations, item);
                }
            }
        }
        _ => {
            return Err(EngineError::infrastructure(format!(
                "{}: expected a top-level array or object",
                path.display()
            )))
        }
    }
    Ok(operations)
}

fn push_operation(out: &mut Vec<Operation>, item: serde_json::Value) {
    let value: Value = item.into();
    if let Some(mapping) = value.as_mapping() {
        out.push(Operation::from_mapping(mapping.clone()));
    }
}

#[cfg(test)]
#[path = "ops_loader_tests.rs"]
mod tests;
