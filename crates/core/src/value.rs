// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic value trees shared by engine config, execution context, operation
//! records, and event payloads.
//!
//! Modeled as a tagged union rather than `serde_json::Value` directly so the
//! placeholder resolver and case-insensitive lookup helpers stay in one
//! place instead of being re-derived at every call site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Render the scalar as a string, the way placeholder substitution does
    /// when a token resolves to a non-string leaf.
    pub fn stringify(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

/// An ordered string-keyed map. Preserves insertion order so operation
/// key iteration and JSON round-trips stay stable.
pub type OrderedMap = IndexMap<String, Value>;

/// A dynamic value: scalar, list, or nested mapping.
///
/// Opaque handles (SQLite connections, progress counters) are represented
/// out-of-band as `HandleId`s stored inside a `Scalar::Int`-like wrapper at
/// the SDK boundary (see `sdk::handle`); they never need to flow through
/// placeholder resolution or config merging, so `Value` itself stays a
/// closed three-variant union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Mapping(OrderedMap),
}

impl Value {
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Str(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }

    pub fn empty_mapping() -> Self {
        Self::Mapping(OrderedMap::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(s) => s.as_bool(),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&OrderedMap> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut OrderedMap> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Case-insensitive single-segment lookup into a mapping. Returns `None`
    /// for non-mapping values or missing keys.
    pub fn get_ci(&self, key: &str) -> Option<&Value> {
        let map = self.as_mapping()?;
        map.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
    }

    /// Case-insensitive dotted-path lookup, e.g. `"Game.Name"`.
    pub fn get_path_ci(&self, path: &str) -> Option<&Value> {
        let mut cur = self;
        for segment in path.split('.') {
            cur = cur.get_ci(segment)?;
        }
        Some(cur)
    }

    /// Insert a key into a mapping, case-insensitively replacing any
    /// existing key that differs only in case. If `self` is not already a
    /// mapping, it is replaced with a fresh empty one first.
    pub fn insert_ci(&mut self, key: impl Into<String>, value: Value) {
        if self.as_mapping().is_none() {
            *self = Value::Mapping(OrderedMap::new());
        }
        let key = key.into();
        if let Value::Mapping(map) = self {
            if let Some(existing) = map.keys().find(|k| k.eq_ignore_ascii_case(&key)).cloned() {
                map.insert(existing, value);
            } else {
                map.insert(key, value);
            }
        }
    }

    /// Merge `other` into `self`: keys already present in `self` win
    /// (case-insensitively); keys only in `other` are copied over. Used by
    /// the Execution Context Builder to merge per-module `config.toml`
    /// placeholders without clobbering engine-level or built-in values.
    pub fn merge_missing(&mut self, other: &Value) {
        let (Some(self_map), Some(other_map)) = (self.as_mapping_mut(), other.as_mapping()) else {
            return;
        };
        for (k, v) in other_map {
            let has = self_map.keys().any(|ek| ek.eq_ignore_ascii_case(k));
            if !has {
                self_map.insert(k.clone(), v.clone());
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Scalar(Scalar::Int(i))
                } else {
                    Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::Str(s)),
            serde_json::Value::Array(a) => Value::List(a.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(o) => {
                let mut map = OrderedMap::new();
                for (k, v) in o {
                    map.insert(k, Value::from(v));
                }
                Value::Mapping(map)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(b),
            Value::Scalar(Scalar::Int(i)) => serde_json::Value::Number(i.into()),
            Value::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::Str(s)) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in map {
                    obj.insert(k, v.into());
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl From<toml::Value> for Value {
    fn from(v: toml::Value) -> Self {
        match v {
            toml::Value::String(s) => Value::Scalar(Scalar::Str(s)),
            toml::Value::Integer(i) => Value::Scalar(Scalar::Int(i)),
            toml::Value::Float(f) => Value::Scalar(Scalar::Float(f)),
            toml::Value::Boolean(b) => Value::Scalar(Scalar::Bool(b)),
            toml::Value::Datetime(d) => Value::Scalar(Scalar::Str(d.to_string())),
            toml::Value::Array(a) => Value::List(a.into_iter().map(Value::from).collect()),
            toml::Value::Table(t) => {
                let mut map = OrderedMap::new();
                for (k, v) in t {
                    map.insert(k, Value::from(v));
                }
                Value::Mapping(map)
            }
        }
    }
}

impl From<Value> for toml::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Scalar(Scalar::Null) => toml::Value::String(String::new()),
            Value::Scalar(Scalar::Bool(b)) => toml::Value::Boolean(b),
            Value::Scalar(Scalar::Int(i)) => toml::Value::Integer(i),
            Value::Scalar(Scalar::Float(f)) => toml::Value::Float(f),
            Value::Scalar(Scalar::Str(s)) => toml::Value::String(s),
            Value::List(items) => toml::Value::Array(items.into_iter().map(Into::into).collect()),
            Value::Mapping(map) => {
                let mut table = toml::value::Table::new();
                for (k, v) in map {
                    table.insert(k, v.into());
                }
                toml::Value::Table(table)
            }
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
