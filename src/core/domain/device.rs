//! Device record.
//!
//! Mirrors a directory twin: reported properties are written by the device,
//! desired properties by keyfleet, and the etag guards every write.

use serde::{Deserialize, Serialize};

use crate::core::types::{DeviceId, ETag, Properties};

/// A device entry as read from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub etag: ETag,
    #[serde(default)]
    pub reported: Properties,
    #[serde(default)]
    pub desired: Properties,
}

impl Device {
    /// A fresh device with empty property bags.
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            etag: "1".to_string(),
            reported: Properties::new(),
            desired: Properties::new(),
        }
    }

    /// Builder-style reported property setter.
    pub fn with_reported(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.reported.insert(field.to_string(), value.into());
        self
    }

    /// Whether `field` is present and non-null in the reported properties.
    pub fn has_reported(&self, field: &str) -> bool {
        self.reported.get(field).is_some_and(|v| !v.is_null())
    }

    /// Reported `field` as text. Strings are returned as-is, other JSON
    /// values as their JSON rendering.
    pub fn reported_text(&self, field: &str) -> Option<String> {
        match self.reported.get(field)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
