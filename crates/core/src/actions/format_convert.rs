// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `format-convert` built-in action (`spec.md` §4.7): selects a converter
//! tool and runs it as a child process through the SDK's process supervisor.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::operation::Operation;
use crate::sdk::Sdk;

const SUPPORTED_TOOLS: &[&str] = &["ffmpeg", "vgmstream", "imagemagick"];
const INFERENCE_FLAGS: &[&str] = &["--source", "--input-ext", "--output-ext", "--type"];

/// Select the tool named by `op.tool`, or failing that infer one from
/// `args` (`-m`/`--mode <tool>` names it directly; any of the media-arg
/// flags imply `ffmpeg`, the general-purpose media converter).
fn select_tool(op: &Operation, args: &[String]) -> Result<String> {
    if let Some(tool) = op.tool() {
        return validate_tool(tool);
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-m" || arg == "--mode" {
            if let Some(tool) = iter.next() {
                return validate_tool(tool);
            }
        }
    }

    if args.iter().any(|a| INFERENCE_FLAGS.contains(&a.as_str())) {
        return Ok("ffmpeg".to_owned());
    }

    Err(EngineError::resolution(format!(
        "format-convert: could not select a tool; supported tools are {}",
        SUPPORTED_TOOLS.join(", ")
    )))
}

fn validate_tool(tool: &str) -> Result<String> {
    let lower = tool.to_ascii_lowercase();
    if SUPPORTED_TOOLS.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(EngineError::resolution(format!(
            "format-convert: unsupported tool '{tool}'; supported tools are {}",
            SUPPORTED_TOOLS.join(", ")
        )))
    }
}

/// Strip a leading `-m`/`--mode <value>` pair from `args` before building
/// the child's argv: the tool name itself is not one of its own arguments.
fn strip_mode_flag(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if arg == "-m" || arg == "--mode" {
            iter.next();
            continue;
        }
        out.push(arg.clone());
    }
    out
}

pub fn run(op: &Operation, args: &[String], sdk: &Sdk) -> Result<bool> {
    let tool = select_tool(op, args)?;
    let mut argv = vec![tool];
    argv.extend(strip_mode_flag(args));

    let result = sdk.run_process(&argv, HashMap::new(), None);
    Ok(result.success)
}

#[cfg(test)]
#[path = "format_convert_tests.rs"]
mod tests;
