//! In-memory device directory for tests and embedding.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{next_etag, paginate, DeviceDirectory, Page, UpdateOutcome};
use crate::core::domain::Device;
use crate::core::types::Properties;
use crate::error::{DirectoryError, Result};

/// Process-local device directory.
#[derive(Debug, Default)]
pub struct Memory {
    devices: Mutex<BTreeMap<String, Device>>,
}

fn poisoned() -> DirectoryError {
    DirectoryError::Unavailable("memory directory lock poisoned".to_string())
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a device record as-is.
    pub fn insert(&self, device: Device) -> Result<()> {
        let mut devices = self.devices.lock().map_err(|_| poisoned())?;
        devices.insert(device.id.clone(), device);
        Ok(())
    }

    /// Current record for `id`.
    pub fn get(&self, id: &str) -> Result<Option<Device>> {
        let devices = self.devices.lock().map_err(|_| poisoned())?;
        Ok(devices.get(id).cloned())
    }

    /// Every record, ordered by id.
    pub fn devices(&self) -> Result<Vec<Device>> {
        let devices = self.devices.lock().map_err(|_| poisoned())?;
        Ok(devices.values().cloned().collect())
    }

    /// Bump the etag of `id`, as a device-side reported update would.
    pub fn touch(&self, id: &str) -> Result<()> {
        let mut devices = self.devices.lock().map_err(|_| poisoned())?;
        let device = devices
            .get_mut(id)
            .ok_or_else(|| DirectoryError::DeviceNotFound(id.to_string()))?;
        device.etag = next_etag(&device.etag);
        Ok(())
    }
}

impl DeviceDirectory for Memory {
    fn query_devices(
        &self,
        field: &str,
        page_size: usize,
        continuation: Option<&str>,
    ) -> Result<Page> {
        let devices = self.devices.lock().map_err(|_| poisoned())?;
        paginate(devices.values(), field, page_size, continuation)
    }

    fn update_device(&self, id: &str, desired: &Properties, etag: &str) -> Result<UpdateOutcome> {
        let mut devices = self.devices.lock().map_err(|_| poisoned())?;
        let device = devices
            .get_mut(id)
            .ok_or_else(|| DirectoryError::DeviceNotFound(id.to_string()))?;

        if device.etag != etag {
            return Ok(UpdateOutcome::Conflict);
        }

        device.desired = desired.clone();
        device.etag = next_etag(&device.etag);
        Ok(UpdateOutcome::Updated {
            etag: device.etag.clone(),
        })
    }
}
