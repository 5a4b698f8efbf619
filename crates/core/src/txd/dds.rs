// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DDS header synthesis (`spec.md` §4.8).

const DDS_MAGIC: &[u8; 4] = b"DDS ";
const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_MIPMAPCOUNT: u32 = 0x2_0000;
const DDSD_LINEARSIZE: u32 = 0x8_0000;
const DDSD_PITCH: u32 = 0x8;

const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;

const DDSCAPS_COMPLEX: u32 = 0x8;
const DDSCAPS_MIPMAP: u32 = 0x40_0000;
const DDSCAPS_TEXTURE: u32 = 0x1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxtVariant {
    Dxt1,
    Dxt3,
    Dxt5,
}

impl DxtVariant {
    fn four_cc(self) -> &'static [u8; 4] {
        match self {
            Self::Dxt1 => b"DXT1",
            Self::Dxt3 => b"DXT3",
            Self::Dxt5 => b"DXT5",
        }
    }

    fn bytes_per_block(self) -> u32 {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }
}

fn blocks(dimension: u32) -> u32 {
    ((dimension + 3) / 4).max(1)
}

/// Build a compressed (DXT1/3/5) DDS header for a `width`×`height` texture
/// with `mip_count` mip levels.
pub fn dxt_header(variant: DxtVariant, width: u32, height: u32, mip_count: u32) -> Vec<u8> {
    let blocks_wide = blocks(width);
    let blocks_high = blocks(height);
    let linear_size = blocks_wide * blocks_high * variant.bytes_per_block();

    let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE;
    if mip_count > 0 {
        flags |= DDSD_MIPMAPCOUNT;
    }

    let mut caps = DDSCAPS_TEXTURE;
    if mip_count > 1 {
        caps |= DDSCAPS_MIPMAP | DDSCAPS_COMPLEX;
    }

    let mut pixel_format = Vec::with_capacity(PIXEL_FORMAT_SIZE as usize);
    pixel_format.extend_from_slice(&PIXEL_FORMAT_SIZE.to_le_bytes());
    pixel_format.extend_from_slice(&DDPF_FOURCC.to_le_bytes());
    pixel_format.extend_from_slice(variant.four_cc());
    pixel_format.extend_from_slice(&[0u8; 20]); // rgbBitCount + 4 masks, unused for FourCC

    header(flags, height, width, linear_size, mip_count, &pixel_format, caps)
}

/// Build an uncompressed RGBA8888 DDS header (used for un-swizzled `0x86`
/// and `0x02` textures).
pub fn rgba8888_header(width: u32, height: u32) -> Vec<u8> {
    let pitch = width * 4;
    let flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_PITCH;

    let mut pixel_format = Vec::with_capacity(PIXEL_FORMAT_SIZE as usize);
    pixel_format.extend_from_slice(&PIXEL_FORMAT_SIZE.to_le_bytes());
    pixel_format.extend_from_slice(&(DDPF_RGB | DDPF_ALPHAPIXELS).to_le_bytes());
    pixel_format.extend_from_slice(b"\0\0\0\0"); // fourCC unused
    pixel_format.extend_from_slice(&32u32.to_le_bytes()); // rgbBitCount
    pixel_format.extend_from_slice(&0x0000_00FFu32.to_le_bytes()); // R
    pixel_format.extend_from_slice(&0x0000_FF00u32.to_le_bytes()); // G
    pixel_format.extend_from_slice(&0x00FF_0000u32.to_le_bytes()); // B
    pixel_format.extend_from_slice(&0xFF00_0000u32.to_le_bytes()); // A

    header(flags, height, width, pitch, 1, &pixel_format, DDSCAPS_TEXTURE)
}

fn header(
    flags: u32,
    height: u32,
    width: u32,
    pitch_or_linear_size: u32,
    mip_map_count: u32,
    pixel_format: &[u8],
    caps: u32,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    out.extend_from_slice(DDS_MAGIC);
    out.extend_from_slice(&HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&pitch_or_linear_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // depth
    out.extend_from_slice(&mip_map_count.to_le_bytes());
    out.extend_from_slice(&[0u8; 11 * 4]); // reserved1
    out.extend_from_slice(pixel_format);
    out.extend_from_slice(&caps.to_le_bytes());
    out.extend_from_slice(&[0u8; 3 * 4]); // caps2, caps3, caps4 (reserved here)
    out.extend_from_slice(&[0u8; 4]); // reserved2
    out
}

#[cfg(test)]
#[path = "dds_tests.rs"]
mod tests;
