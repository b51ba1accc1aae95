use super::date;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A decoded JSON value in which tagged date strings have been revived.
///
/// This is `serde_json::Value` plus a [`WireValue::Date`] variant.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<WireValue>),
    Object(BTreeMap<String, WireValue>),
}

impl WireValue {
    /// Converts a parsed JSON tree, reviving tagged dates at string leaves.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => match date::untag(&s) {
                Some(instant) => WireValue::Date(instant),
                None => WireValue::String(s),
            },
            serde_json::Value::Array(items) => {
                WireValue::Array(items.into_iter().map(WireValue::from_json).collect())
            }
            serde_json::Value::Object(fields) => WireValue::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, WireValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts back into plain JSON. Dates become RFC 3339 strings with millisecond
    /// precision, which is what `DateTime<Utc>` deserializes from.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            WireValue::Null => serde_json::Value::Null,
            WireValue::Bool(b) => serde_json::Value::Bool(b),
            WireValue::Number(n) => serde_json::Value::Number(n),
            WireValue::String(s) => serde_json::Value::String(s),
            WireValue::Date(instant) => {
                serde_json::Value::String(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            WireValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(WireValue::into_json).collect())
            }
            WireValue::Object(fields) => serde_json::Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into_json())).collect(),
            ),
        }
    }

    /// Returns the field `key` if this is an object containing it.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        match self {
            WireValue::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Removes and returns the field `key` if this is an object containing it.
    pub fn take(&mut self, key: &str) -> Option<WireValue> {
        match self {
            WireValue::Object(fields) => fields.remove(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            WireValue::Date(instant) => Some(*instant),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }
}

impl From<serde_json::Value> for WireValue {
    fn from(value: serde_json::Value) -> Self {
        WireValue::from_json(value)
    }
}

impl From<WireValue> for serde_json::Value {
    fn from(value: WireValue) -> Self {
        value.into_json()
    }
}

impl From<DateTime<Utc>> for WireValue {
    fn from(instant: DateTime<Utc>) -> Self {
        WireValue::Date(instant)
    }
}

impl Serialize for WireValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WireValue::Null => serializer.serialize_unit(),
            WireValue::Bool(b) => serializer.serialize_bool(*b),
            WireValue::Number(n) => n.serialize(serializer),
            WireValue::String(s) => serializer.serialize_str(s),
            WireValue::Date(instant) => date::serialize(instant, serializer),
            WireValue::Array(items) => serializer.collect_seq(items),
            WireValue::Object(fields) => serializer.collect_map(fields),
        }
    }
}
