// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation, Prompt, and PromptAnswers records (`spec.md` §3, §6.1).

use indexmap::IndexMap;

use crate::value::{OrderedMap, Value};

/// Execution mode for an operation (`spec.md` §6.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    Engine,
    Lua,
    Js,
    Bms,
    Python,
}

impl ScriptType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "engine" => Some(Self::Engine),
            "lua" | "lau" => Some(Self::Lua),
            "js" | "javascript" => Some(Self::Js),
            "bms" => Some(Self::Bms),
            "python" => Some(Self::Python),
            _ => None,
        }
    }

    pub fn is_embedded(self) -> bool {
        matches!(self, Self::Engine | Self::Lua | Self::Js)
    }
}

/// A declared prompt type (`spec.md` §3, `Prompt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    Text,
    Confirm,
    Checkbox,
}

impl PromptType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "confirm" => Some(Self::Confirm),
            "checkbox" => Some(Self::Checkbox),
            _ => None,
        }
    }

    /// The type-specific empty value (`spec.md` §3 / §4.11).
    pub fn empty_value(self) -> Value {
        match self {
            Self::Confirm => Value::bool(false),
            Self::Checkbox => Value::List(Vec::new()),
            Self::Text => Value::null(),
        }
    }
}

/// A single declared prompt (`spec.md` §3, `Prompt`).
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub name: String,
    pub prompt_type: PromptType,
    pub default: Option<Value>,
    pub choices: Vec<String>,
    pub condition: Option<String>,
}

/// Case-insensitive map `Prompt.Name -> value` (`spec.md` §3, `PromptAnswers`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptAnswers(pub IndexMap<String, Value>);

impl PromptAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(existing) = self.0.keys().find(|k| k.eq_ignore_ascii_case(&name)).cloned() {
            self.0.insert(existing, value);
        } else {
            self.0.insert(name, value);
        }
    }

    /// Render as a `Value::Mapping` for placeholder resolution under
    /// `{{PromptAnswers.<Name>}}`.
    pub fn as_value(&self) -> Value {
        let mut map = OrderedMap::new();
        for (k, v) in &self.0 {
            map.insert(k.clone(), v.clone());
        }
        Value::Mapping(map)
    }
}

/// A single declarative pipeline step (`spec.md` §3, §6.1).
///
/// Unknown keys are preserved untouched in `fields` alongside the
/// recognized ones (`spec.md` §4.10).
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub fields: OrderedMap,
}

impl Operation {
    pub fn from_mapping(fields: OrderedMap) -> Self {
        Self { fields }
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
    }

    pub fn name(&self) -> Option<&str> {
        self.field("Name").and_then(Value::as_str)
    }

    pub fn script_type(&self) -> Option<ScriptType> {
        self.field("script_type").and_then(Value::as_str).and_then(ScriptType::parse)
    }

    pub fn script(&self) -> Option<&str> {
        self.field("script").and_then(Value::as_str)
    }

    pub fn args(&self) -> Vec<Value> {
        self.field("args").and_then(Value::as_list).map(<[Value]>::to_vec).unwrap_or_default()
    }

    pub fn is_init(&self) -> bool {
        self.field("init").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn is_run_all(&self) -> bool {
        self.field("run-all")
            .or_else(|| self.field("run_all"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn tool(&self) -> Option<&str> {
        self.field("tool").and_then(Value::as_str)
    }

    /// `input` / `output` / `extension` (`spec.md` §4.3, §4.9 — used to
    /// build the `bms` argv: `<quickbms_path> <script> <input> <output>`).
    pub fn input(&self) -> Option<&str> {
        self.field("input").and_then(Value::as_str)
    }

    pub fn output(&self) -> Option<&str> {
        self.field("output").and_then(Value::as_str)
    }

    pub fn extension(&self) -> Option<&str> {
        self.field("extension").and_then(Value::as_str)
    }

    pub fn format(&self) -> Option<&str> {
        self.field("format").and_then(Value::as_str)
    }

    pub fn db(&self) -> Option<&str> {
        self.field("db").and_then(Value::as_str)
    }

    pub fn tools_manifest(&self) -> Option<&str> {
        self.field("tools_manifest").and_then(Value::as_str)
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        let Some(list) = self.field("prompts").and_then(Value::as_list) else {
            return Vec::new();
        };
        list.iter().filter_map(parse_prompt).collect()
    }

    /// `onsuccess` / `on_success`: a single mapping or a list of mappings,
    /// normalized to a list of child `Operation`s.
    pub fn on_success(&self) -> Vec<Operation> {
        let Some(value) = self.field("onsuccess").or_else(|| self.field("on_success")) else {
            return Vec::new();
        };
        match value {
            Value::Mapping(m) => vec![Operation::from_mapping(m.clone())],
            Value::List(items) => items
                .iter()
                .filter_map(|v| v.as_mapping().cloned())
                .map(Operation::from_mapping)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Display name for sequencer events (`spec.md` §4.11):
    /// `op.Name` or `basename(op.script)` or `"Operation"`.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_owned();
        }
        if let Some(script) = self.script() {
            if let Some(base) = std::path::Path::new(script).file_name().and_then(|n| n.to_str())
            {
                return base.to_owned();
            }
        }
        "Operation".to_owned()
    }
}

fn parse_prompt(value: &Value) -> Option<Prompt> {
    let map = value.as_mapping()?;
    let name = map.iter().find(|(k, _)| k.eq_ignore_ascii_case("Name"))?.1.as_str()?.to_owned();
    let prompt_type = map
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("type"))
        .and_then(|(_, v)| v.as_str())
        .and_then(PromptType::parse)
        .unwrap_or(PromptType::Text);
    let default = map.iter().find(|(k, _)| k.eq_ignore_ascii_case("default")).map(|(_, v)| v.clone());
    let choices = map
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("choices"))
        .and_then(|(_, v)| v.as_list())
        .map(|l| l.iter().filter_map(Value::as_str).map(str::to_owned).collect())
        .unwrap_or_default();
    let condition = map
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("condition"))
        .and_then(|(_, v)| v.as_str())
        .map(str::to_owned);

    Some(Prompt { name, prompt_type, default, choices, condition })
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
