//! Result of one distribution run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::types::{DeviceId, KeyName};

/// Counts and skipped ids from a single distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSummary {
    pub started_at: DateTime<Utc>,
    /// Secrets wrapped for each device
    pub secrets: usize,
    /// Stored values skipped because they were not valid base64
    pub skipped_secrets: Vec<KeyName>,
    /// Directory pages consumed
    pub pages: usize,
    /// Devices returned by the directory query
    pub devices_seen: usize,
    /// Devices whose desired properties were written
    pub devices_updated: usize,
    /// Devices skipped because their id or public key failed validation
    pub invalid_key: Vec<DeviceId>,
    /// Devices skipped because the record changed since it was read
    pub conflicts: Vec<DeviceId>,
    /// Devices skipped because wrapping or the write failed
    pub failed: Vec<DeviceId>,
}

impl DistributionSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            secrets: 0,
            skipped_secrets: Vec::new(),
            pages: 0,
            devices_seen: 0,
            devices_updated: 0,
            invalid_key: Vec::new(),
            conflicts: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Devices seen but not updated.
    pub fn devices_skipped(&self) -> usize {
        self.invalid_key.len() + self.conflicts.len() + self.failed.len()
    }

    /// Whether every device seen was updated.
    pub fn is_clean(&self) -> bool {
        self.devices_skipped() == 0 && self.skipped_secrets.is_empty()
    }
}
