// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `validate-files` built-in action (`spec.md` §4.7).

use std::path::Path;

use super::external::FileValidator;
use crate::error::{EngineError, Result};
use crate::operation::Operation;

pub fn run(op: &Operation, args: &[String], validator: &dyn FileValidator) -> Result<()> {
    let db = op.db().ok_or_else(|| EngineError::resolution("validate-files requires op.db"))?;
    validator.validate(Path::new(db), args)
}

#[cfg(test)]
#[path = "validate_files_tests.rs"]
mod tests;
