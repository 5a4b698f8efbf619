// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sqlite.open`/handle operations (`spec.md` §4.5).

use std::path::Path;

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::Connection;

use super::allowlist::PathAllowlist;
use crate::error::{EngineError, Result};
use crate::value::{OrderedMap, Scalar, Value};

pub struct SqliteHandle {
    connection: Connection,
}

impl SqliteHandle {
    pub fn open(allowlist: &PathAllowlist, path: &Path) -> Result<Self> {
        if !allowlist.is_allowed(path) {
            return Err(EngineError::resolution(format!(
                "path not allow-listed: {}",
                path.display()
            )));
        }
        let connection =
            Connection::open(path).map_err(|e| EngineError::infrastructure(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Execute a statement that doesn't return rows; returns rows affected.
    pub fn exec(&self, sql: &str, params: &[(String, Value)]) -> Result<usize> {
        let named = named_params(params);
        let refs: Vec<(&str, &dyn rusqlite::ToSql)> =
            named.iter().map(|(k, v)| (k.as_str(), v as &dyn rusqlite::ToSql)).collect();
        self.connection
            .execute(sql, refs.as_slice())
            .map_err(|e| EngineError::recoverable(e.to_string()))
    }

    pub fn query(&self, sql: &str, params: &[(String, Value)]) -> Result<Vec<Value>> {
        let named = named_params(params);
        let refs: Vec<(&str, &dyn rusqlite::ToSql)> =
            named.iter().map(|(k, v)| (k.as_str(), v as &dyn rusqlite::ToSql)).collect();

        let mut stmt =
            self.connection.prepare(sql).map_err(|e| EngineError::recoverable(e.to_string()))?;
        let column_names: Vec<String> =
            stmt.column_names().iter().map(|s| (*s).to_owned()).collect();

        let rows = stmt
            .query_map(refs.as_slice(), |row| {
                let mut map = OrderedMap::new();
                for (i, name) in column_names.iter().enumerate() {
                    let cell = row.get_ref(i)?;
                    map.insert(name.clone(), value_from_sql(cell));
                }
                Ok(Value::Mapping(map))
            })
            .map_err(|e| EngineError::recoverable(e.to_string()))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| EngineError::recoverable(e.to_string()))
    }

    pub fn begin(&self) -> Result<()> {
        self.connection
            .execute_batch("BEGIN")
            .map_err(|e| EngineError::recoverable(e.to_string()))
    }

    pub fn commit(&self) -> Result<()> {
        self.connection
            .execute_batch("COMMIT")
            .map_err(|e| EngineError::recoverable(e.to_string()))
    }

    pub fn rollback(&self) -> Result<()> {
        self.connection
            .execute_batch("ROLLBACK")
            .map_err(|e| EngineError::recoverable(e.to_string()))
    }
}

/// Auto-prefix unprefixed parameter names with `:` (`spec.md` §4.5).
fn named_params(params: &[(String, Value)]) -> Vec<(String, SqlValue)> {
    params
        .iter()
        .map(|(name, value)| {
            let key = if name.starts_with(':') { name.clone() } else { format!(":{name}") };
            (key, sql_value_from(value))
        })
        .collect()
}

fn sql_value_from(value: &Value) -> SqlValue {
    match value {
        Value::Scalar(Scalar::Null) => SqlValue::Null,
        Value::Scalar(Scalar::Bool(b)) => SqlValue::Integer(i64::from(*b)),
        Value::Scalar(Scalar::Int(i)) => SqlValue::Integer(*i),
        Value::Scalar(Scalar::Float(f)) => SqlValue::Real(*f),
        Value::Scalar(Scalar::Str(s)) => SqlValue::Text(s.clone()),
        Value::List(_) | Value::Mapping(_) => {
            SqlValue::Text(serde_json::to_string(&serde_json::Value::from(value.clone())).unwrap_or_default())
        }
    }
}

/// Value conversion rules (`spec.md` §4.5): null passthrough, bytes → hex,
/// everything else passthrough.
fn value_from_sql(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Scalar(Scalar::Null),
        ValueRef::Integer(i) => Value::Scalar(Scalar::Int(i)),
        ValueRef::Real(f) => Value::Scalar(Scalar::Float(f)),
        ValueRef::Text(t) => Value::string(String::from_utf8_lossy(t)),
        ValueRef::Blob(b) => Value::string(hex::encode(b)),
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
