//! JSON file device directory.
//!
//! The whole directory is one JSON document, re-read on every call. Writes
//! go through a temporary file and a rename.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{next_etag, paginate, DeviceDirectory, Page, UpdateOutcome};
use crate::core::domain::Device;
use crate::core::types::Properties;
use crate::error::{DirectoryError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    devices: Vec<Device>,
}

/// Device directory backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(DirectoryError::Io)?;
        let mut doc: Document = serde_json::from_str(&contents).map_err(DirectoryError::Parse)?;
        doc.devices.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(doc)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(DirectoryError::Io)?;
        }
        let contents = serde_json::to_string_pretty(doc).map_err(DirectoryError::Parse)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(DirectoryError::Io)?;
        fs::rename(&tmp, &self.path).map_err(DirectoryError::Io)?;
        Ok(())
    }

    /// Register a device reporting `public_key` under `field`.
    ///
    /// With `force`, an existing device has its reported key replaced and
    /// its etag bumped, as a device re-reporting would.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::AlreadyEnrolled` if `id` exists and `force`
    /// is false.
    pub fn enroll(&self, id: &str, field: &str, public_key: &str, force: bool) -> Result<Device> {
        let mut doc = self.load()?;

        let device = match doc.devices.iter_mut().find(|d| d.id == id) {
            Some(existing) if force => {
                existing
                    .reported
                    .insert(field.to_string(), public_key.into());
                existing.etag = next_etag(&existing.etag);
                existing.clone()
            }
            Some(_) => return Err(DirectoryError::AlreadyEnrolled(id.to_string()).into()),
            None => {
                let device = Device::new(id).with_reported(field, public_key);
                doc.devices.push(device.clone());
                device
            }
        };

        self.save(&doc)?;
        debug!(device = %id, "device enrolled");
        Ok(device)
    }

    /// Current record for `id`.
    pub fn get(&self, id: &str) -> Result<Option<Device>> {
        Ok(self.load()?.devices.into_iter().find(|d| d.id == id))
    }

    /// Every record, ordered by id.
    pub fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.load()?.devices)
    }
}

impl DeviceDirectory for JsonFile {
    fn query_devices(
        &self,
        field: &str,
        page_size: usize,
        continuation: Option<&str>,
    ) -> Result<Page> {
        let doc = self.load()?;
        paginate(&doc.devices, field, page_size, continuation)
    }

    fn update_device(&self, id: &str, desired: &Properties, etag: &str) -> Result<UpdateOutcome> {
        let mut doc = self.load()?;
        let device = doc
            .devices
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DirectoryError::DeviceNotFound(id.to_string()))?;

        if device.etag != etag {
            return Ok(UpdateOutcome::Conflict);
        }

        device.desired = desired.clone();
        device.etag = next_etag(&device.etag);
        let etag = device.etag.clone();

        self.save(&doc)?;
        Ok(UpdateOutcome::Updated { etag })
    }
}
