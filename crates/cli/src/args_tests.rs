// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

#[test]
fn parses_inline_invocation_with_repeated_flags() {
    let cli = Cli::parse_from([
        "remake-engine",
        "--root",
        "/tmp/repo",
        "--game",
        "demo",
        "--script",
        "format-extract",
        "--arg",
        "in.txd",
        "--arg",
        "out",
        "--answer",
        "Scale=2x",
        "--answer",
        "Overwrite=true",
    ]);

    assert!(cli.is_inline_invocation());
    assert_eq!(cli.arg, vec!["in.txd".to_owned(), "out".to_owned()]);
    assert_eq!(
        parse_pairs(&cli.answer),
        vec![("Scale".to_owned(), "2x".to_owned()), ("Overwrite".to_owned(), "true".to_owned())]
    );
}

#[test]
fn underscore_aliases_match_dashed_flags() {
    let cli = Cli::parse_from(["remake-engine", "--game_root", "/games/x", "--ops_file", "ops.toml"]);
    assert_eq!(cli.game_root, Some(std::path::PathBuf::from("/games/x")));
    assert_eq!(cli.ops_file, Some(std::path::PathBuf::from("ops.toml")));
}

#[test]
fn not_inline_invocation_without_a_script() {
    let cli = Cli::parse_from(["remake-engine", "--game", "demo"]);
    assert!(!cli.is_inline_invocation());
}

#[test]
fn parse_pairs_skips_malformed_entries() {
    let pairs = parse_pairs(&["a=1".to_owned(), "no-equals-sign".to_owned(), "b=2".to_owned()]);
    assert_eq!(pairs, vec![("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2".to_owned())]);
}
