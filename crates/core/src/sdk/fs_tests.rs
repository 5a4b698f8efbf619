// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::sdk::allowlist::PathAllowlist;

#[test]
fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let path = dir.path().join("out.txt");
    assert!(write_file(&allowlist, &path, b"hello").unwrap());
    assert_eq!(read_file(&allowlist, &path).unwrap(), b"hello");
}

#[test]
fn denied_path_is_a_resolution_error() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let result = write_file(&allowlist, Path::new("/etc/shadow"), b"x");
    assert!(matches!(result, Err(EngineError::Resolution(_))));
}

#[test]
fn copy_dir_recurses_into_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let src = dir.path().join("src");
    std::fs::create_dir_all(src.join("nested")).unwrap();
    std::fs::write(src.join("nested/file.txt"), b"data").unwrap();
    let dst = dir.path().join("dst");

    assert!(copy_dir(&allowlist, &src, &dst).unwrap());
    assert_eq!(std::fs::read(dst.join("nested/file.txt")).unwrap(), b"data");
}

#[test]
fn md5_matches_known_vector() {
    assert_eq!(md5("abc"), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn sha1_file_matches_known_vector() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(sha1_file(&allowlist, &path).unwrap(), "a9993e364706816aba3e25717850c26c9cd0d89");
}

#[test]
fn list_dir_returns_sorted_names() {
    let dir = tempfile::tempdir().unwrap();
    let allowlist = PathAllowlist::new(dir.path());
    std::fs::write(dir.path().join("b.txt"), b"").unwrap();
    std::fs::write(dir.path().join("a.txt"), b"").unwrap();
    assert_eq!(list_dir(&allowlist, dir.path()).unwrap(), vec!["a.txt", "b.txt"]);
}
