//! Raw record model shared by all record sources

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// One entry from a record source.
///
/// Field names vary across source systems; each source converts its native
/// payload into this shape before the inventory builders see it.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    /// IP address or host record name. A record without one is unusable
    /// and gets skipped by the builders.
    pub identifier: Option<String>,
    /// Preferred display name. Blank values fall back to `identifier`.
    pub display_name: Option<String>,
    /// Source-side classification, e.g. a DNS view.
    pub group_key: Option<String>,
    /// Custom attributes attached to the record.
    pub extattrs: BTreeMap<String, AttributeValue>,
}

impl RawRecord {
    /// Resolve the inventory name for this record.
    ///
    /// Prefers a non-blank `display_name` and falls back to `identifier`.
    /// Returns `None` when neither yields a usable name.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ => match self.identifier.as_deref() {
                Some(name) if !name.trim().is_empty() => Some(name),
                _ => None,
            },
        }
    }
}

/// One extended-attribute value as it arrives from a source.
///
/// Sources disagree on the wire shape: NIOS wraps every value in a
/// `{"value": ...}` object while phpIPAM sends the scalar directly. Both
/// deserialize into this enum, and [`AttributeValue::into_scalar`] collapses
/// them to a plain value or nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Wrapper object carrying the actual value. A wrapper without a usable
    /// `value` field resolves to nothing rather than an error.
    Wrapped {
        /// The wrapped value, if any.
        value: Option<Value>,
    },
    /// Plain scalar straight from the source.
    Scalar(Value),
}

impl AttributeValue {
    /// Unwrap one level of wrapper and reject anything that is not a
    /// usable scalar (null, empty string, arrays, objects).
    #[must_use]
    pub fn into_scalar(self) -> Option<Value> {
        let value = match self {
            AttributeValue::Wrapped { value } => value?,
            AttributeValue::Scalar(value) => value,
        };

        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        }
    }
}
