//! Device catalog entries and request payloads

use super::AttrValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A device record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier, assigned by the service
    pub id: String,

    /// Display name of the device
    pub name: String,

    /// Free-form attribute payload; `null` or absent on several records
    #[serde(default)]
    pub data: Option<BTreeMap<String, AttrValue>>,
}

impl Device {
    /// Look up an attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.data.as_ref().and_then(|data| data.get(key))
    }

    /// Check whether the device carries an attribute.
    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }
}

/// Payload for creating a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDevice {
    /// Display name for the new device
    pub name: String,

    /// Attribute payload sent with the device
    pub data: NewDeviceData,
}

/// The attribute payload shape used when creating devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeviceData {
    /// Device color
    pub color: String,

    /// Storage capacity, e.g. `128 GB`
    pub capacity: String,
}

/// The service's echo of a freshly created device.
///
/// Every field is optional so an incomplete echo surfaces as a failed
/// presence check rather than a decode error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedDevice {
    /// Identifier assigned by the service
    #[serde(default)]
    pub id: Option<String>,

    /// Echoed display name
    #[serde(default)]
    pub name: Option<String>,

    /// Server-side creation timestamp
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    /// Echoed attribute payload
    #[serde(default)]
    pub data: Option<NewDeviceData>,
}
