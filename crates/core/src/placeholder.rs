// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder Resolver (`spec.md` §4.1).
//!
//! Substitutes `{{path.to.value}}` tokens inside strings, recursing into
//! lists and mappings. Pure and referentially transparent: no I/O, no
//! mutation of the context.

use tracing::warn;

use crate::value::{Scalar, Value};

/// Resolve every `{{dotted.path}}` token in `value` against `context`,
/// returning a new value. Non-string leaves pass through unchanged.
pub fn resolve(context: &Value, value: &Value) -> Value {
    match value {
        Value::Scalar(Scalar::Str(s)) => Value::Scalar(resolve_string(context, s)),
        Value::Scalar(other) => Value::Scalar(other.clone()),
        Value::List(items) => Value::List(items.iter().map(|v| resolve(context, v)).collect()),
        Value::Mapping(map) => {
            let mut out = crate::value::OrderedMap::new();
            for (k, v) in map {
                out.insert(k.clone(), resolve(context, v));
            }
            Value::Mapping(out)
        }
    }
}

/// Resolve placeholders within a single string, returning a scalar (so a
/// whole-string token like `"{{Game_Root}}"` can resolve to a non-string
/// value instead of being forced into a string).
fn resolve_string(context: &Value, s: &str) -> Scalar {
    if let Some(path) = whole_token(s) {
        return match context.get_path_ci(path) {
            Some(Value::Scalar(scalar)) => scalar.clone(),
            Some(other) => Scalar::Str(stringify_value(other)),
            None => {
                warn!(token = %s, "unresolved placeholder");
                Scalar::Str(s.to_owned())
            }
        };
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("{{") {
        let Some(end_rel) = rest[start + 2..].find("}}") else {
            out.push_str(rest);
            rest = "";
            break;
        };
        let end = start + 2 + end_rel;
        out.push_str(&rest[..start]);
        let path = rest[start + 2..end].trim();
        match context.get_path_ci(path) {
            Some(Value::Scalar(scalar)) => out.push_str(&scalar.stringify()),
            Some(other) => out.push_str(&stringify_value(other)),
            None => {
                warn!(token = path, "unresolved placeholder");
                out.push_str(&rest[start..end + 2]);
            }
        }
        rest = &rest[end + 2..];
    }
    out.push_str(rest);
    Scalar::Str(out)
}

/// If `s` is exactly one `{{...}}` token with nothing else around it,
/// return the inner dotted path.
fn whole_token(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    let inner = trimmed.strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(inner.trim())
}

fn stringify_value(v: &Value) -> String {
    match v {
        Value::Scalar(s) => s.stringify(),
        Value::List(_) | Value::Mapping(_) => {
            serde_json::to_string(&serde_json::Value::from(v.clone())).unwrap_or_default()
        }
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
