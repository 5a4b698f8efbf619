// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators for the three built-in actions whose concrete transport is
//! out of scope (`spec.md` §1: "Git cloning of modules, tool-binary
//! downloading... specified only by the data shapes they produce").
//!
//! Each trait models the contract at the call boundary; a front-end wires in
//! a real implementation (network client, validator, filesystem walker).
//! The default implementations here report the collaborator as unconfigured
//! rather than silently succeeding.

use std::path::Path;

use crate::error::{EngineError, Result};

pub trait ToolDownloader: Send + Sync {
    fn download(&self, manifest: &Path, central_index: &Path, force: bool) -> Result<()>;
}

pub trait FileValidator: Send + Sync {
    fn validate(&self, db: &Path, args: &[String]) -> Result<()>;
}

pub trait FolderRenamer: Send + Sync {
    fn rename(&self, args: &[String]) -> Result<()>;
}

/// Bundles the three out-of-scope collaborators an `engine` action may need.
pub struct ExternalCollaborators<'a> {
    pub downloader: &'a dyn ToolDownloader,
    pub validator: &'a dyn FileValidator,
    pub renamer: &'a dyn FolderRenamer,
}

/// Reports every call as an infrastructure error; used when a front-end has
/// not wired in a real collaborator.
pub struct Unconfigured;

impl ToolDownloader for Unconfigured {
    fn download(&self, _manifest: &Path, _central_index: &Path, _force: bool) -> Result<()> {
        Err(EngineError::infrastructure("no tool downloader configured"))
    }
}

impl FileValidator for Unconfigured {
    fn validate(&self, _db: &Path, _args: &[String]) -> Result<()> {
        Err(EngineError::infrastructure("no file validator configured"))
    }
}

impl FolderRenamer for Unconfigured {
    fn rename(&self, _args: &[String]) -> Result<()> {
        Err(EngineError::infrastructure("no folder renamer configured"))
    }
}

static UNCONFIGURED: Unconfigured = Unconfigured;

impl ExternalCollaborators<'static> {
    pub fn unconfigured() -> Self {
        Self { downloader: &UNCONFIGURED, validator: &UNCONFIGURED, renamer: &UNCONFIGURED }
    }
}
