//! Field value types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Compare against the textual form used by `search`
    ///
    /// Strings compare case-insensitively, since the searchable string
    /// fields (emails, slugs) are all stored lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.eq_ignore_ascii_case(needle),
            FieldValue::Integer(i) => needle.parse::<i64>().is_ok_and(|n| n == *i),
            FieldValue::Float(f) => needle.parse::<f64>().is_ok_and(|n| n == *f),
            FieldValue::Boolean(b) => needle.parse::<bool>().is_ok_and(|n| n == *b),
            FieldValue::Date(d) => d.to_string() == needle,
            FieldValue::DateTime(dt) => dt.to_rfc3339() == needle,
            FieldValue::Null => needle.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}
