// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executable allow-list (`spec.md` §4.4, §4.5 subprocess runner).

use std::path::Path;

const BLOCKED: &[(&str, &str)] = &[
    ("copy", "sdk.copy_file(src, dst, overwrite)"),
    ("xcopy", "sdk.copy_dir(src, dst, overwrite)"),
    ("robocopy", "sdk.copy_dir(src, dst, overwrite)"),
    ("move", "sdk.move_dir(src, dst)"),
    ("ren", "sdk.rename_file(src, dst)"),
    ("rename", "sdk.rename_file(src, dst)"),
    ("cp", "sdk.copy_file(src, dst, overwrite)"),
    ("mv", "sdk.move_dir(src, dst)"),
    ("rm", "sdk.remove_file(path) / sdk.remove_dir(path)"),
    ("mkdir", "sdk.ensure_dir(path)"),
    ("rmdir", "sdk.remove_dir(path)"),
    ("tar", "sdk.extract_archive(src, dst) / sdk.create_archive(src, dst, \"zip\")"),
    ("unzip", "sdk.extract_archive(src, dst)"),
    ("7z", "sdk.extract_archive(src, dst)"),
    ("7za", "sdk.extract_archive(src, dst)"),
];

const APPROVED: &[&str] = &[
    "blender",
    "quickbms",
    "godot",
    "vgmstream-cli",
    "ffmpeg",
    "git",
    "pwsh",
    "powershell",
    "python",
    "node",
    "npm",
];

/// Check `executable` (a path or bare name) against the allow-list. `Ok(())`
/// permits spawning; `Err(message)` is the stderr line to emit on rejection.
pub fn check_executable(executable: &str) -> Result<(), String> {
    let basename = basename_no_ext(executable);

    if let Some((name, alternative)) =
        BLOCKED.iter().find(|(b, _)| b.eq_ignore_ascii_case(&basename))
    {
        return Err(format!(
            "SECURITY: System utility '{name}' is blocked for security. Use SDK alternative: \
             {alternative}"
        ));
    }

    if APPROVED.iter().any(|a| a.eq_ignore_ascii_case(&basename)) {
        return Ok(());
    }

    if has_tools_path_component(executable) {
        return Ok(());
    }

    Ok(())
}

fn basename_no_ext(executable: &str) -> String {
    let name = Path::new(executable)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(executable);
    match name.rsplit_once('.') {
        Some((stem, _ext)) => stem.to_owned(),
        None => name.to_owned(),
    }
}

fn has_tools_path_component(executable: &str) -> bool {
    Path::new(executable)
        .components()
        .any(|c| c.as_os_str().eq_ignore_ascii_case("Tools"))
}

#[cfg(test)]
#[path = "allowlist_tests.rs"]
mod tests;
