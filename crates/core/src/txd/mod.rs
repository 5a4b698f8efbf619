// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TXD Extraction Core (`spec.md` §4.8): turn one RenderWare `.txd` file
//! into zero or more `.dds` files.

mod dds;
mod morton;
mod scanner;
mod signatures;
#[cfg(test)]
pub mod test_support;
mod texture;

use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::event::{Event, EventSink};
use signatures::{find_all, TEXTURE_NAME_SIG};
use texture::TextureOutcome;

/// Extract every texture found in `data` (the full bytes of one `.txd`
/// file) into `output_dir`, emitting a `warning` event for each recoverable
/// texture failure. Returns the count of `.dds` files actually written.
///
/// A fatal error inside a segment aborts the whole file; a recoverable
/// error skips just the offending texture and moves on to the next
/// occurrence of `TextureNameSig` (`spec.md` §4.8 "Error taxonomy").
pub fn extract(data: &[u8], output_dir: &Path, sink: &dyn EventSink) -> Result<usize> {
    let segments = scanner::segment(data)?;
    fs::create_dir_all(output_dir)
        .map_err(|e| EngineError::infrastructure(format!("cannot create {}: {e}", output_dir.display())))?;

    let mut exported = 0usize;

    for seg in &segments {
        let bytes = &data[seg.bytes.clone()];
        let occurrences = find_all(bytes, TEXTURE_NAME_SIG);

        for name_sig_offset in occurrences {
            match texture::scan_one(bytes, name_sig_offset, seg.file_offset + name_sig_offset) {
                Ok(TextureOutcome::Texture { name, dds_bytes }) => {
                    let file_offset = seg.file_offset + name_sig_offset;
                    let filename = format!("{}.dds", texture::sanitize_name(&name, file_offset));
                    let out_path = output_dir.join(filename);
                    fs::write(&out_path, &dds_bytes).map_err(|e| {
                        EngineError::infrastructure(format!("cannot write {}: {e}", out_path.display()))
                    })?;
                    exported += 1;
                }
                Ok(TextureOutcome::Placeholder) => {}
                Err(EngineError::Fatal(message)) => {
                    return Err(EngineError::fatal(message));
                }
                Err(EngineError::Recoverable(message)) => {
                    sink.on_event(&Event::Warning { message });
                }
                Err(other) => return Err(other),
            }
        }
    }

    Ok(exported)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
