//! Extended-attribute flattening

use std::collections::BTreeMap;

use serde_json::Value;

use crate::record::AttributeValue;

/// Flatten a record's extended attributes into `name -> scalar`.
///
/// One level of value wrapper is unwrapped; attributes whose resolved value
/// is null, empty, or not a scalar are dropped. Names pass through verbatim.
/// A bad entry never fails the rest of the record.
#[must_use]
pub fn flatten_extattrs(attrs: &BTreeMap<String, AttributeValue>) -> BTreeMap<String, Value> {
    attrs
        .iter()
        .filter_map(|(name, value)| value.clone().into_scalar().map(|v| (name.clone(), v)))
        .collect()
}
