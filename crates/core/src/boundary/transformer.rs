//! Decode and encode monetary fields at the network boundary.
//!
//! Decode runs on every parsed response body before application code sees
//! it; encode runs on every outgoing request body before serialization. Both
//! are single synchronous walks over the tree.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use rust_decimal::prelude::*;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use monto_shared::config::{BoundaryConfig, MismatchPolicy};
use monto_shared::{MonetaryValue, MoneyResult};

use super::error::BoundaryError;
use super::registry::FieldRegistry;
use super::value::WireValue;

/// Converts registered money fields between wire primitives and
/// `MonetaryValue`.
#[derive(Debug, Clone, Default)]
pub struct BoundaryTransformer {
    registry: FieldRegistry,
    policy: MismatchPolicy,
}

impl BoundaryTransformer {
    /// Creates a transformer with the lenient mismatch policy.
    #[must_use]
    pub fn new(registry: FieldRegistry) -> Self {
        Self {
            registry,
            policy: MismatchPolicy::default(),
        }
    }

    /// Creates a transformer using the configured mismatch policy.
    #[must_use]
    pub fn from_config(registry: FieldRegistry, config: &BoundaryConfig) -> Self {
        Self::new(registry).with_policy(config.mismatch_policy)
    }

    /// Sets the mismatch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registry in use.
    #[must_use]
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Mismatch policy in use.
    #[must_use]
    pub fn policy(&self) -> MismatchPolicy {
        self.policy
    }

    /// Wraps every registered number or string field in a `MonetaryValue`,
    /// at any depth.
    ///
    /// Already-decoded `Money` and `Date` leaves pass through untouched, so
    /// decoding twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::InvalidField` if a registered field does not
    /// hold a finite decimal, and `BoundaryError::TypeMismatch` for a
    /// mis-typed field under the strict policy.
    pub fn decode(&self, value: WireValue) -> Result<WireValue, BoundaryError> {
        debug!(kind = value.kind(), policy = ?self.policy, "Decoding payload");
        self.decode_value(value)
    }

    /// Decodes a parsed `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Same as `decode`.
    pub fn decode_json(&self, value: Value) -> Result<WireValue, BoundaryError> {
        self.decode(WireValue::from(value))
    }

    /// Parses and decodes a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::Json` for malformed input, otherwise same as
    /// `decode`.
    pub fn decode_str(&self, payload: &str) -> Result<WireValue, BoundaryError> {
        let value: Value = serde_json::from_str(payload)?;
        self.decode_json(value)
    }

    /// Replaces every `MonetaryValue` with a plain JSON number and every
    /// date with an RFC 3339 string.
    #[must_use]
    pub fn encode(&self, value: &WireValue) -> Value {
        debug!(kind = value.kind(), "Encoding payload");
        encode_value(value)
    }

    /// Encodes and serializes to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::Json` if serialization fails.
    pub fn encode_to_string(&self, value: &WireValue) -> Result<String, BoundaryError> {
        Ok(serde_json::to_string(&self.encode(value))?)
    }

    fn decode_value(&self, value: WireValue) -> Result<WireValue, BoundaryError> {
        match value {
            WireValue::Array(items) => items
                .into_iter()
                .map(|item| self.decode_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(WireValue::Array),
            WireValue::Object(fields) => fields
                .into_iter()
                .map(|(key, value)| {
                    let decoded = if self.registry.contains(&key) {
                        self.decode_field(&key, value)?
                    } else {
                        self.decode_value(value)?
                    };
                    Ok((key, decoded))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(WireValue::Object),
            leaf => Ok(leaf),
        }
    }

    fn decode_field(&self, field: &str, value: WireValue) -> Result<WireValue, BoundaryError> {
        let invalid = |source| BoundaryError::InvalidField {
            field: field.to_string(),
            source,
        };

        match value {
            WireValue::Number(n) => money_from_number(&n)
                .map(WireValue::Money)
                .map_err(invalid),
            WireValue::String(s) => MonetaryValue::from_string(&s)
                .map(WireValue::Money)
                .map_err(invalid),
            WireValue::Array(_) | WireValue::Object(_) => self.decode_value(value),
            WireValue::Null | WireValue::Money(_) | WireValue::Date(_) => Ok(value),
            WireValue::Bool(_) => self.on_mismatch(field, &value),
        }
    }

    // TODO: make Strict the default once payload producers stop sending
    // booleans under money keys.
    fn on_mismatch(&self, field: &str, value: &WireValue) -> Result<WireValue, BoundaryError> {
        match self.policy {
            MismatchPolicy::Lenient => {
                warn!(
                    field,
                    found = value.kind(),
                    "Monetary field has unexpected type, substituting zero"
                );
                Ok(WireValue::Money(MonetaryValue::ZERO))
            }
            MismatchPolicy::Strict => Err(BoundaryError::TypeMismatch {
                field: field.to_string(),
                found: value.kind(),
            }),
        }
    }
}

/// Parses the number's literal digits, so `12.345678901234567890` and
/// `"12.345678901234567890"` decode to the same value.
fn money_from_number(n: &Number) -> MoneyResult<MonetaryValue> {
    MonetaryValue::from_string(&n.to_string())
}

fn encode_value(value: &WireValue) -> Value {
    match value {
        WireValue::Null => Value::Null,
        WireValue::Bool(b) => Value::Bool(*b),
        WireValue::Number(n) => Value::Number(n.clone()),
        WireValue::String(s) => Value::String(s.clone()),
        WireValue::Array(items) => Value::Array(items.iter().map(encode_value).collect()),
        WireValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), encode_value(value)))
                .collect(),
        ),
        WireValue::Money(money) => encode_money(money),
        WireValue::Date(date) => Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

/// Whole amounts encode as JSON integers, everything else via `to_number`.
fn encode_money(money: &MonetaryValue) -> Value {
    let amount = money.as_decimal();
    if amount.fract().is_zero()
        && let Some(whole) = amount.to_i64()
    {
        return Value::Number(Number::from(whole));
    }
    Number::from_f64(money.to_number()).map_or(Value::Null, Value::Number)
}
