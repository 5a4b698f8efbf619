// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Segmentation of a `.txd` file into per-block byte ranges (`spec.md`
//! §4.8 "Segmentation").

use super::signatures::{find_all, find_eof_pattern, SIG_BLOCK_START, SIG_FILE_START};
use crate::error::{EngineError, Result};

pub struct Segment {
    /// Absolute start offset of this segment's payload within the file.
    pub file_offset: usize,
    pub bytes: std::ops::Range<usize>,
}

/// Locate the unique EOF pattern and split the file into segments.
pub fn segment(data: &[u8]) -> Result<Vec<Segment>> {
    let eof_hits = find_eof_pattern(data);
    if eof_hits.len() != 1 {
        return Err(EngineError::fatal(format!(
            "expected exactly one EOF pattern, found {}",
            eof_hits.len()
        )));
    }
    let eof_start = eof_hits[0];

    let mut segments = Vec::new();
    let block_starts: Vec<usize> = find_all(&data[..eof_start], SIG_BLOCK_START);

    let starts_with_file_sig = data.len() >= SIG_FILE_START.len() && &data[..4] == SIG_FILE_START;

    let mut cursor = if starts_with_file_sig {
        let first_block = block_starts.iter().find(|&&s| s >= 4).copied();
        let end = first_block.unwrap_or(eof_start);
        if end > 4 {
            segments.push(Segment { file_offset: 4, bytes: 4..end });
        }
        end
    } else {
        0
    };

    for &block_start in &block_starts {
        if block_start < cursor {
            continue;
        }
        if block_start == eof_start {
            break;
        }
        let payload_start = block_start + SIG_BLOCK_START.len();
        let next_block =
            block_starts.iter().find(|&&s| s > block_start).copied().unwrap_or(eof_start);
        let end = next_block.min(eof_start);
        if payload_start < end {
            segments.push(Segment { file_offset: payload_start, bytes: payload_start..end });
        }
        cursor = end;
    }

    if segments.is_empty() {
        if starts_with_file_sig && eof_start > 0x28 {
            segments.push(Segment { file_offset: 0x28, bytes: 0x28..eof_start });
        } else {
            return Err(EngineError::fatal("no segments could be produced"));
        }
    }

    Ok(segments)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
