// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn display_includes_taxonomy_kind_and_message() {
    let e = EngineError::fatal("bad metadata alignment");
    assert_eq!(e.to_string(), "fatal error: bad metadata alignment");
}

#[test]
fn message_extracts_inner_text_for_every_variant() {
    assert_eq!(EngineError::resolution("a").message(), "a");
    assert_eq!(EngineError::recoverable("b").message(), "b");
    assert_eq!(EngineError::infrastructure("c").message(), "c");
    assert_eq!(EngineError::unsupported("d").message(), "d");
}
