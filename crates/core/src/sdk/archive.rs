// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive helpers (`spec.md` §4.5): built-in zip support, other formats
//! fail with a tool suggestion.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipArchive;

use super::allowlist::PathAllowlist;
use crate::error::{EngineError, Result};

fn guard(allowlist: &PathAllowlist, path: &Path) -> Result<()> {
    if allowlist.is_allowed(path) {
        Ok(())
    } else {
        Err(EngineError::resolution(format!("path not allow-listed: {}", path.display())))
    }
}

pub fn extract_archive(allowlist: &PathAllowlist, src: &Path, dst: &Path) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;

    let ext = src.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    if ext != "zip" {
        return Err(EngineError::unsupported(format!(
            "archive format '.{ext}' is not built in; use a dedicated tool (e.g. 7z) via \
             sdk.run_process"
        )));
    }

    let file = File::open(src).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    std::fs::create_dir_all(dst).map_err(|e| EngineError::infrastructure(e.to_string()))?;

    for i in 0..archive.len() {
        let mut entry =
            archive.by_index(i).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        let Some(out_path) = entry.enclosed_name() else { continue };
        let target = dst.join(out_path);
        if entry.is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| EngineError::infrastructure(e.to_string()))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EngineError::infrastructure(e.to_string()))?;
        }
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        std::fs::write(&target, buf).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    }
    Ok(true)
}

pub fn create_archive(allowlist: &PathAllowlist, src: &Path, dst: &Path, format: &str) -> Result<bool> {
    guard(allowlist, src)?;
    guard(allowlist, dst)?;
    if !format.eq_ignore_ascii_case("zip") {
        return Err(EngineError::unsupported(format!("archive format '{format}' is not built in")));
    }

    let file = File::create(dst).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    if src.is_file() {
        let name = src.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        writer.start_file(name, options).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        let bytes = std::fs::read(src).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        writer.write_all(&bytes).map_err(|e| EngineError::infrastructure(e.to_string()))?;
    } else {
        add_dir_entries(&mut writer, src, src, options)?;
    }
    writer.finish().map_err(|e| EngineError::infrastructure(e.to_string()))?;
    Ok(true)
}

fn add_dir_entries(
    writer: &mut zip::ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| EngineError::infrastructure(e.to_string()))? {
        let entry = entry.map_err(|e| EngineError::infrastructure(e.to_string()))?;
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path).to_string_lossy().replace('\\', "/");
        if path.is_dir() {
            writer
                .add_directory(format!("{relative}/"), options)
                .map_err(|e| EngineError::infrastructure(e.to_string()))?;
            add_dir_entries(writer, root, &path, options)?;
        } else {
            writer
                .start_file(relative, options)
                .map_err(|e| EngineError::infrastructure(e.to_string()))?;
            let bytes =
                std::fs::read(&path).map_err(|e| EngineError::infrastructure(e.to_string()))?;
            writer.write_all(&bytes).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
