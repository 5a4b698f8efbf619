// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::value::OrderedMap;

fn ctx() -> Value {
    let mut game = OrderedMap::new();
    game.insert("Name".to_owned(), Value::string("demo"));
    game.insert("RootPath".to_owned(), Value::string("/games/demo"));

    let mut root = OrderedMap::new();
    root.insert("Game".to_owned(), Value::Mapping(game));
    root.insert("Force".to_owned(), Value::bool(true));
    Value::Mapping(root)
}

#[test]
fn whole_string_token_resolves_to_nested_value() {
    let resolved = resolve(&ctx(), &Value::string("{{Game.Name}}"));
    assert_eq!(resolved.as_str(), Some("demo"));
}

#[test]
fn whole_string_token_is_case_insensitive() {
    let resolved = resolve(&ctx(), &Value::string("{{game.name}}"));
    assert_eq!(resolved.as_str(), Some("demo"));
}

#[test]
fn embedded_token_is_stringified_into_surrounding_text() {
    let resolved = resolve(&ctx(), &Value::string("root=/{{Game.RootPath}}/out"));
    assert_eq!(resolved.as_str(), Some("root=//games/demo/out"));
}

#[test]
fn non_string_whole_token_preserves_type() {
    let resolved = resolve(&ctx(), &Value::string("{{Force}}"));
    assert_eq!(resolved, Value::bool(true));
}

#[test]
fn unresolved_token_is_left_literal() {
    let resolved = resolve(&ctx(), &Value::string("{{Missing.Path}}"));
    assert_eq!(resolved.as_str(), Some("{{Missing.Path}}"));
}

#[test]
fn recurses_into_lists_and_mappings() {
    let mut nested = OrderedMap::new();
    nested.insert("k".to_owned(), Value::string("{{Game.Name}}"));
    let value = Value::List(vec![Value::string("{{Game.Name}}"), Value::Mapping(nested)]);

    let resolved = resolve(&ctx(), &value);
    let list = resolved.as_list().unwrap();
    assert_eq!(list[0].as_str(), Some("demo"));
    assert_eq!(list[1].get_ci("k").and_then(Value::as_str), Some("demo"));
}

#[test]
fn resolving_an_already_resolved_value_is_a_no_op() {
    let once = resolve(&ctx(), &Value::string("{{Game.Name}}-{{Force}}"));
    let twice = resolve(&ctx(), &once);
    assert_eq!(once, twice);
}

#[test]
fn non_string_leaves_pass_through_unchanged() {
    let value = Value::bool(false);
    assert_eq!(resolve(&ctx(), &value), value);
}
