// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture builders for TXD tests, used both within this module and
//! by the `format-extract` action's tests.

use super::signatures::TEXTURE_NAME_SIG;

fn metadata_block(format: u8, width: u16, height: u16, mip_count: u8, data_size: u32) -> Vec<u8> {
    let mut block = vec![0u8; 16];
    block[3] = format;
    block[4..6].copy_from_slice(&width.to_be_bytes());
    block[6..8].copy_from_slice(&height.to_be_bytes());
    block[9] = mip_count;
    block[12..16].copy_from_slice(&data_size.to_le_bytes());
    block
}

/// One `TextureNameSig`-prefixed texture record: name, metadata block, and
/// pixel payload. The metadata block's marker (`0x01`, `format`) sits 2
/// bytes into the block.
pub fn build_texture_record(
    name: &str,
    format: u8,
    width: u16,
    height: u16,
    mip_count: u8,
    pixels: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(TEXTURE_NAME_SIG);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(&[0u8; 3]);
    out.push(0xFF);

    let block = metadata_block(format, width, height, mip_count, pixels.len() as u32);
    out.extend_from_slice(&block[0..2]);
    out.push(0x01);
    out.push(format);
    out.extend_from_slice(&block[4..]);
    out.extend_from_slice(pixels);
    out
}

/// A single DXT1 (`0x52`) record: shorthand for the common case.
pub fn build_dxt1_record(name: &str, width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
    build_texture_record(name, 0x52, width, height, 1, pixels)
}

/// The fixed `EofPrefix || 8 wildcard bytes || EofSuffix` pattern that
/// terminates every segmentable `.txd` fixture.
pub fn eof_pattern() -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&[
        0x03, 0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x2D, 0x00, 0x02, 0x1C, 0x2F, 0xEA, 0x00,
        0x00, 0x08, 0x00, 0x00, 0x00, 0x2D, 0x00, 0x02, 0x1C,
    ]);
    v.extend_from_slice(&[0u8; 8]);
    v.extend_from_slice(&[0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2D, 0x00, 0x02, 0x1C]);
    v
}
