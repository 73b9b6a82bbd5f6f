//! Tagged tree for payloads crossing the network boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use monto_shared::MonetaryValue;

/// A JSON-shaped value that may also carry already-typed leaves.
///
/// Wire payloads only ever contain the first six variants. `Money` and `Date`
/// appear after decoding or when application code builds an outgoing body.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept as parsed.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<WireValue>),
    /// JSON object.
    Object(BTreeMap<String, WireValue>),
    /// Decoded monetary value.
    Money(MonetaryValue),
    /// Timestamp.
    Date(DateTime<Utc>),
}

impl WireValue {
    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Money(_) => "monetary value",
            Self::Date(_) => "date",
        }
    }

    /// Looks up a key if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Returns the monetary value if this is a `Money` leaf.
    #[must_use]
    pub const fn as_money(&self) -> Option<&MonetaryValue> {
        match self {
            Self::Money(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for WireValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<MonetaryValue> for WireValue {
    fn from(value: MonetaryValue) -> Self {
        Self::Money(value)
    }
}

impl From<DateTime<Utc>> for WireValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<K: Into<String>> FromIterator<(K, WireValue)> for WireValue {
    fn from_iter<T: IntoIterator<Item = (K, WireValue)>>(iter: T) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
