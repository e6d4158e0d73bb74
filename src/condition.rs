//! Condition records attached to groups, fields and select options.
//!
//! Conditions are carried as data only. Nothing in this crate evaluates a
//! `statement` against field values; a rules engine would consume these
//! structures as they are.

use crate::error::SchemaValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single `{name, statement, value}` record. Every key is optional and may
/// hold any JSON value.
///
/// `None` means the key was absent; an explicit `null` is kept as
/// `Some(Value::Null)` so the record serialises back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub statement: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// A key that is present maps to `Some`, even when it holds `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl Condition {
    /// Build a condition from its JSON record. A non-object record yields an
    /// empty condition.
    pub fn from_json(json: &Value) -> Self {
        Self {
            name: json.get("name").cloned(),
            statement: json.get("statement").cloned(),
            value: json.get("value").cloned(),
        }
    }

    /// The condition's name when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn statement(&self) -> Option<&str> {
        self.statement.as_ref().and_then(Value::as_str)
    }
}

/// A logical combination (`type`, e.g. `AND`/`OR`) of conditions.
///
/// On the wire the condition list lives under `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Value>,
    #[serde(rename = "fields", default)]
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn from_json(json: &Value, path: &str) -> Result<Self, SchemaValidationError> {
        let kind = json.get("type").cloned();
        let conditions = match json.get("fields") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(Condition::from_json).collect(),
            Some(other) => {
                return Err(SchemaValidationError::new(
                    format!("{}.fields", path),
                    format!("expected an array of conditions, found {}", json_kind(other)),
                ))
            }
        };
        Ok(Self { kind, conditions })
    }

    /// The combinator (`AND`, `OR`, ...) when it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_ref().and_then(Value::as_str)
    }
}

/// Parse a `conditions_groups` list. Absent or null means no groups.
pub fn parse_condition_groups(
    json: Option<&Value>,
    path: &str,
) -> Result<Vec<ConditionGroup>, SchemaValidationError> {
    match json {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| ConditionGroup::from_json(item, &format!("{}[{}]", path, i)))
            .collect(),
        Some(other) => Err(SchemaValidationError::new(
            path,
            format!(
                "expected an array of condition groups, found {}",
                json_kind(other)
            ),
        )),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
