// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem helpers exposed under `sdk.*` to embedded scripts (`spec.md`
//! §4.5). Every entry point checks the path allow-list first; a denied path
//! returns `Err` (the dispatcher maps this to `false`/`null` plus an
//! `error` event, per spec, rather than propagating a Rust panic).

use std::path::{Path, PathBuf};

use md5::{Digest as Md5Digest, Md5};
use sha1::Sha1;

use super::allowlist::PathAllowlist;
use crate::error::{EngineError, Result};

fn guard(allowlist: &PathAllowlist, path: &Path) -> Result<()> {
    if allowlist.is_allowed(path) {
        Ok(())
    } else {
        Err(EngineError::resolution(format!(
            "path not allow-listed: {}",
            path.display()
        )))
    }
}

pub fn ensure_dir(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    std::fs::create_dir_all(path)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn mkdir(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    ensure_dir(allowlist, path)
}

pub fn path_exists(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(path.exists())
}

pub fn lexists(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(path.symlink_metadata().is_ok())
}

pub fn is_dir(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(path.is_dir())
}

pub fn is_file(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(path.is_file())
}

pub fn is_writable(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(std::fs::metadata(path).map(|m| !m.permissions().readonly()).unwrap_or(false))
}

pub fn remove_dir(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    std::fs::remove_dir_all(path)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn remove_file(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    std::fs::remove_file(path)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn copy_file(allowlist: &PathAllowlist, src: &Path, dst: &Path) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    }
    std::fs::copy(src, dst)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn copy_dir(allowlist: &PathAllowlist, src: &Path, dst: &Path) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;
    copy_dir_recursive(src, dst).map(|_| true)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    for entry in std::fs::read_dir(src).map_err(|e| EngineError::infrastructure(e.to_string()))? {
        let entry = entry.map_err(|e| EngineError::infrastructure(e.to_string()))?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)
                .map_err(|e| EngineError::infrastructure(e.to_string()))?;
        }
    }
    Ok(())
}

pub fn move_dir(allowlist: &PathAllowlist, src: &Path, dst: &Path) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;
    if std::fs::rename(src, dst).is_ok() {
        return Ok(true);
    }
    copy_dir_recursive(src, dst)?;
    std::fs::remove_dir_all(src).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    Ok(true)
}

pub fn rename_file(allowlist: &PathAllowlist, src: &Path, dst: &Path) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;
    std::fs::rename(src, dst)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn write_file(allowlist: &PathAllowlist, path: &Path, contents: &[u8]) -> Result<bool> {
    guard(allowlist, path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    }
    std::fs::write(path, contents)
        .map(|_| true)
        .map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn read_file(allowlist: &PathAllowlist, path: &Path) -> Result<Vec<u8>> {
    guard(allowlist, path)?;
    std::fs::read(path).map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn sha1_file(allowlist: &PathAllowlist, path: &Path) -> Result<String> {
    let bytes = read_file(allowlist, path)?;
    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

pub fn md5(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

pub fn list_dir(allowlist: &PathAllowlist, path: &Path) -> Result<Vec<String>> {
    guard(allowlist, path)?;
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| EngineError::infrastructure(e.to_string()))? {
        let entry = entry.map_err(|e| EngineError::infrastructure(e.to_string()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

pub fn realpath(allowlist: &PathAllowlist, path: &Path) -> Result<PathBuf> {
    guard(allowlist, path)?;
    path.canonicalize().map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn readlink(allowlist: &PathAllowlist, path: &Path) -> Result<PathBuf> {
    guard(allowlist, path)?;
    std::fs::read_link(path).map_err(|e| EngineError::infrastructure(e.to_string()))
}

pub fn is_symlink(allowlist: &PathAllowlist, path: &Path) -> Result<bool> {
    guard(allowlist, path)?;
    Ok(path.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false))
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
