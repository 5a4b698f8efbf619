// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem path allow-list (`spec.md` §4.5) shared by the SDK surface and
//! the subprocess runner's `cwd` checks.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DENIED_PREFIXES: &[&str] = &[
    "/windows/system32",
    "/windows/syswow64",
    "/program files",
    "/program files (x86)",
    "/etc/",
    "/bin/",
    "/sbin/",
    "/usr/bin/",
    "/usr/sbin/",
    "/sys/",
    "/proc/",
    "/dev/",
];

/// The set of path roots approved so far (built-ins plus anything approved
/// interactively this process lifetime).
pub struct PathAllowlist {
    roots: Vec<PathBuf>,
    approved: Mutex<Vec<PathBuf>>,
}

impl PathAllowlist {
    /// `repo_root` seeds the standard engine subdirectories.
    pub fn new(repo_root: &Path) -> Self {
        let mut roots = vec![
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            repo_root.to_path_buf(),
            repo_root.join("EngineApps"),
            repo_root.join("gamefiles"),
            repo_root.join("tools"),
            repo_root.join("tmp"),
            repo_root.join("source"),
            std::env::temp_dir(),
        ];
        if let Some(home) = dirs_home() {
            roots.push(home.clone());
            roots.push(home.join("Documents"));
        }
        Self { roots, approved: Mutex::new(Vec::new()) }
    }

    /// `true` if `path` (relative or absolute) is permitted.
    pub fn is_allowed(&self, path: &Path) -> bool {
        if path.is_relative() {
            return true;
        }
        let normalized = normalize(path);
        let lower = normalized.to_string_lossy().to_lowercase();
        if DENIED_PREFIXES.iter().any(|d| lower.starts_with(d)) {
            return self.is_interactively_approved(&normalized);
        }
        if self.roots.iter().any(|root| normalized.starts_with(normalize(root))) {
            return true;
        }
        self.is_interactively_approved(&normalized)
    }

    fn is_interactively_approved(&self, normalized: &Path) -> bool {
        self.lock_approved().iter().any(|root| normalized.starts_with(root))
    }

    /// Record interactive approval of `root` for the remainder of this
    /// process's lifetime (`spec.md` §4.5 "Interactive approval").
    pub fn approve(&self, root: &Path) {
        self.lock_approved().push(normalize(root));
    }

    /// A poisoned lock (from a panic in another thread while holding it)
    /// still carries a usable list; recover it rather than propagating the
    /// poison into every caller of a `bool`-returning path check.
    fn lock_approved(&self) -> std::sync::MutexGuard<'_, Vec<PathBuf>> {
        self.approved.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
#[path = "allowlist_tests.rs"]
mod tests;
