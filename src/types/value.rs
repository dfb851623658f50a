//! Dynamic attribute values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single device attribute value.
///
/// The service does not constrain the `data` payload: the same key can hold
/// a string on one device and a number on another, and some records nest
/// further maps. This union covers every JSON shape the catalog returns.
///
/// `Display` renders the canonical literal form, so a price stored as the
/// number `419.99` and one stored as the string `"419.99"` both render as
/// `419.99` and compare equal against the documented literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept exactly as received
    Number(serde_json::Number),
    /// JSON string
    String(String),
    /// JSON array
    List(Vec<AttrValue>),
    /// JSON object
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check whether the value is JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::String(s) => f.write_str(s),
            AttrValue::List(_) | AttrValue::Map(_) => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}
