// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::OutputStream;
use std::sync::Mutex;
use test_support::{build_dxt1_record, build_texture_record, eof_pattern};

struct RecordingSink {
    warnings: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { warnings: Mutex::new(Vec::new()) }
    }
}

impl EventSink for RecordingSink {
    fn on_output(&self, _line: &str, _stream: OutputStream) {}

    fn on_event(&self, event: &Event) {
        if let Event::Warning { message } = event {
            self.warnings.lock().unwrap().push(message.clone());
        }
    }
}

/// `spec.md` §8 scenario 4: one DXT1 texture plus one placeholder produce
/// exactly one `.dds` file.
#[test]
fn extract_writes_only_the_real_texture_and_skips_the_placeholder() {
    let pixels = vec![0xABu8; 32]; // 8x8 DXT1, one mip: linearSize = 2*2*8.
    let mut data = Vec::new();
    data.extend_from_slice(&[0x16, 0x00, 0x00, 0x00]); // SigFileStart
    data.extend(build_dxt1_record("wall", 8, 8, &pixels));
    data.extend(build_texture_record("pad", 0x52, 0, 0, 0, &[]));
    data.extend(eof_pattern());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let sink = RecordingSink::new();

    let count = extract(&data, &out, &sink).unwrap();
    assert_eq!(count, 1);

    let wall_path = out.join("wall.dds");
    assert!(wall_path.is_file());
    assert!(!out.join("pad.dds").exists());

    let written = fs::read(&wall_path).unwrap();
    assert_eq!(&written[0..4], b"DDS ");
    assert_eq!(&written[128..], pixels.as_slice());
}

/// `spec.md` §8 scenario 5: a swizzled 0x02 (A8) texture expands to RGBA.
#[test]
fn extract_expands_swizzled_a8_texture() {
    // 1x1 so Morton order is trivial: a single alpha byte.
    let pixels = vec![0x7Fu8];
    let mut data = Vec::new();
    data.extend_from_slice(&[0x16, 0x00, 0x00, 0x00]);
    data.extend(build_texture_record("glow", 0x02, 1, 1, 1, &pixels));
    data.extend(eof_pattern());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let sink = RecordingSink::new();

    let count = extract(&data, &out, &sink).unwrap();
    assert_eq!(count, 1);

    let written = fs::read(out.join("glow.dds")).unwrap();
    assert_eq!(&written[128..], &[0, 0, 0, 0x7F]);
}

/// A fatal error (no EOF pattern at all) aborts the whole file.
#[test]
fn extract_propagates_fatal_segmentation_errors() {
    let data = vec![0u8; 16];
    let dir = tempfile::tempdir().unwrap();
    let sink = RecordingSink::new();
    let result = extract(&data, dir.path(), &sink);
    assert!(result.is_err());
}
