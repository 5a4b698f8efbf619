// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-segment texture scanning: name parsing, metadata block parsing, and
//! format-code dispatch (`spec.md` §4.8).

use super::dds::{self, DxtVariant};
use super::morton;
use crate::error::{EngineError, Result};

/// Outcome of scanning one texture inside a segment.
pub enum TextureOutcome {
    /// A real texture with pixel data ready to be written out.
    Texture { name: String, dds_bytes: Vec<u8> },
    /// A placeholder (`width == 0 && height == 0`): recoverable, skipped.
    Placeholder,
}

struct Metadata {
    format: u8,
    width: u16,
    height: u16,
    mip_count: u8,
    data_size: u32,
}

/// Scan one segment for a single texture record starting at its
/// `TextureNameSig` occurrence. `file_offset` is the absolute offset of
/// `segment` within the original file, used for synthesized names.
pub fn scan_one(segment: &[u8], name_sig_offset: usize, file_offset: usize) -> Result<TextureOutcome> {
    let name_field_start = name_sig_offset + 12;
    let Some(double_null) = find_double_null(segment, name_field_start) else {
        return Err(EngineError::recoverable("malformed texture name signature"));
    };
    let raw_name = &segment[name_field_start..double_null];
    let name = decode_name(raw_name, file_offset + name_field_start);

    let mut cursor = double_null + 2;
    while cursor < segment.len() && segment[cursor] == 0 {
        cursor += 1;
    }
    if cursor >= segment.len() {
        return Err(EngineError::recoverable("no non-zero byte before metadata marker"));
    }

    let Some(marker) = find_metadata_marker(segment, cursor) else {
        return Err(EngineError::fatal("metadata marker 0x01 not found"));
    };

    let block_start = marker.checked_sub(2).ok_or_else(|| {
        EngineError::fatal("metadata block would start before segment")
    })?;
    if block_start + 16 > segment.len() {
        return Err(EngineError::fatal("metadata block out of range"));
    }
    let block = &segment[block_start..block_start + 16];
    let format = block[3];
    if format != segment[marker + 1] {
        return Err(EngineError::fatal("metadata format byte mismatch"));
    }

    let metadata = Metadata {
        format,
        width: u16::from_be_bytes([block[4], block[5]]),
        height: u16::from_be_bytes([block[6], block[7]]),
        mip_count: block[9],
        data_size: u32::from_le_bytes([block[12], block[13], block[14], block[15]]),
    };

    if metadata.width == 0 && metadata.height == 0 {
        return Ok(TextureOutcome::Placeholder);
    }
    if (metadata.width == 0) != (metadata.height == 0) {
        return Err(EngineError::fatal("width/height zero mismatch"));
    }
    if metadata.data_size == 0 {
        return Err(EngineError::fatal("dataSize is zero"));
    }

    let pixel_start = block_start + 16;
    let pixel_end = pixel_start
        .checked_add(metadata.data_size as usize)
        .ok_or_else(|| EngineError::fatal("dataSize overflow"))?;
    if pixel_end > segment.len() {
        return Err(EngineError::fatal("not enough pixel data"));
    }
    let pixel_data = &segment[pixel_start..pixel_end];

    let dds_bytes = convert(&metadata, pixel_data)?;
    Ok(TextureOutcome::Texture { name, dds_bytes })
}

fn convert(metadata: &Metadata, pixels: &[u8]) -> Result<Vec<u8>> {
    let (w, h) = (metadata.width as u32, metadata.height as u32);
    match metadata.format {
        0x52 => Ok(concat(dds::dxt_header(DxtVariant::Dxt1, w, h, metadata.mip_count as u32), pixels)),
        0x53 => Ok(concat(dds::dxt_header(DxtVariant::Dxt3, w, h, metadata.mip_count as u32), pixels)),
        0x54 => Ok(concat(dds::dxt_header(DxtVariant::Dxt5, w, h, metadata.mip_count as u32), pixels)),
        0x86 => {
            if metadata.data_size != w * h * 4 {
                return Err(EngineError::fatal("0x86 dataSize must equal w*h*4"));
            }
            let unswizzled = morton::unswizzle(pixels, w, h, 4);
            let swapped = swap_br(&unswizzled);
            Ok(concat(dds::rgba8888_header(w, h), &swapped))
        }
        0x02 => {
            let unswizzled = expand_02(metadata, pixels)?;
            Ok(concat(dds::rgba8888_header(w, h), &unswizzled))
        }
        other => Err(EngineError::fatal(format!("unknown format code 0x{other:02X}"))),
    }
}

fn concat(mut header: Vec<u8>, pixels: &[u8]) -> Vec<u8> {
    header.extend_from_slice(pixels);
    header
}

fn swap_br(bgra: &[u8]) -> Vec<u8> {
    let mut out = bgra.to_vec();
    for chunk in out.chunks_exact_mut(4) {
        chunk.swap(0, 2);
    }
    out
}

fn expand_02(metadata: &Metadata, pixels: &[u8]) -> Result<Vec<u8>> {
    let (w, h) = (metadata.width as u32, metadata.height as u32);
    let count = (w * h) as usize;
    if metadata.data_size as usize == count {
        let unswizzled = morton::unswizzle(pixels, w, h, 1);
        let mut out = Vec::with_capacity(count * 4);
        for a in unswizzled {
            out.extend_from_slice(&[0, 0, 0, a]);
        }
        Ok(out)
    } else if metadata.data_size as usize == count * 2 {
        let unswizzled = morton::unswizzle(pixels, w, h, 2);
        let mut out = Vec::with_capacity(count * 4);
        for pair in unswizzled.chunks_exact(2) {
            let (p, a) = (pair[0], pair[1]);
            out.extend_from_slice(&[p, p, p, a]);
        }
        Ok(out)
    } else {
        Err(EngineError::fatal("0x02 dataSize must equal w*h or w*h*2"))
    }
}

fn find_double_null(data: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i + 1 < data.len() {
        if data[i] == 0 && data[i + 1] == 0 {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn find_metadata_marker(data: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i + 1 < data.len() {
        if data[i] == 0x01 && matches!(data[i + 1], 0x52 | 0x53 | 0x54 | 0x86 | 0x02) {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn decode_name(raw: &[u8], file_offset: usize) -> String {
    let decoded = match std::str::from_utf8(raw) {
        Ok(s) => s.to_owned(),
        Err(_) => raw.iter().map(|b| format!("{b:02X}")).collect(),
    };
    if decoded.trim().is_empty() {
        format!("unnamed_texture_at_0x{file_offset:08X}")
    } else {
        decoded
    }
}

/// Sanitize a texture name for use as a filename (`spec.md` §4.8 "Output
/// naming").
pub fn sanitize_name(name: &str, file_offset: usize) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if (c as u32) < 0x20 || c as u32 == 0x7F || "<>:\"/\\|?*".contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        format!("texture_at_0x{file_offset:08X}")
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
