// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `format-extract` built-in action (`spec.md` §4.7): `op.format ∈ {txd,
//! null}` routes to the TXD extractor; any other format is an error.

use std::path::Path;

use crate::error::{EngineError, Result};
use crate::event::EventSink;
use crate::operation::Operation;
use crate::txd;

/// `op.args`, resolved: `[0]` is a `.txd` file or a directory of `.txd`
/// files, `[1]` is the output directory. Returns the number of `.dds`
/// files written.
pub fn run(op: &Operation, args: &[String], sink: &dyn EventSink) -> Result<usize> {
    if let Some(format) = op.format() {
        if !format.eq_ignore_ascii_case("txd") {
            return Err(EngineError::resolution(format!("format-extract: unsupported format '{format}'")));
        }
    }

    let [input, output_dir, ..] = args else {
        return Err(EngineError::resolution("format-extract requires [input, output_dir] args"));
    };
    let input = Path::new(input);
    let output_dir = Path::new(output_dir);

    if input.is_dir() {
        let mut total = 0usize;
        let mut entries: Vec<_> = std::fs::read_dir(input)
            .map_err(|e| EngineError::infrastructure(format!("reading {}: {e}", input.display())))?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("txd")))
            .collect();
        entries.sort();

        for path in entries {
            let data = std::fs::read(&path)
                .map_err(|e| EngineError::infrastructure(format!("reading {}: {e}", path.display())))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("texture_set");
            total += txd::extract(&data, &output_dir.join(stem), sink)?;
        }
        Ok(total)
    } else {
        let data = std::fs::read(input)
            .map_err(|e| EngineError::infrastructure(format!("reading {}: {e}", input.display())))?;
        txd::extract(&data, output_dir, sink)
    }
}

#[cfg(test)]
#[path = "format_extract_tests.rs"]
mod tests;
