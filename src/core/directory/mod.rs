//! Device directory.
//!
//! The directory exclusively owns device records. keyfleet reads reported
//! properties and writes desired properties, guarded by each record's etag.
//!
//! ## Adding a New Directory Backend
//!
//! 1. Implement the `DeviceDirectory` trait
//! 2. Add the implementation in a new file (e.g., `iothub.rs`)
//! 3. Re-export from this module

use crate::core::domain::Device;
use crate::core::types::{ETag, Properties};
use crate::error::{DirectoryError, Result};

mod json;
mod memory;

pub use json::JsonFile;
pub use memory::Memory;

/// One page of a device query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub devices: Vec<Device>,
    /// Token for the next page, `None` once the query is exhausted
    pub continuation: Option<String>,
}

impl Page {
    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Result of a conditional device write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Written; the record now carries `etag`.
    Updated { etag: ETag },
    /// The record changed since it was read; nothing was written.
    Conflict,
}

/// Device directory trait.
pub trait DeviceDirectory {
    /// Fetch one page of devices whose reported properties define `field`.
    ///
    /// Pass the previous page's continuation token to get the next page.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidPageSize` for a zero page size, or a
    /// `DirectoryError` if the directory cannot be reached.
    fn query_devices(
        &self,
        field: &str,
        page_size: usize,
        continuation: Option<&str>,
    ) -> Result<Page>;

    /// Replace the desired properties of `id` if its etag still matches.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DeviceNotFound` if `id` is unknown, or a
    /// `DirectoryError` if the write could not be attempted.
    fn update_device(&self, id: &str, desired: &Properties, etag: &str) -> Result<UpdateOutcome>;
}

impl<T: DeviceDirectory + ?Sized> DeviceDirectory for &T {
    fn query_devices(
        &self,
        field: &str,
        page_size: usize,
        continuation: Option<&str>,
    ) -> Result<Page> {
        (**self).query_devices(field, page_size, continuation)
    }

    fn update_device(&self, id: &str, desired: &Properties, etag: &str) -> Result<UpdateOutcome> {
        (**self).update_device(id, desired, etag)
    }
}

/// Page through `devices` (ordered by id) after the `continuation` id.
pub(crate) fn paginate<'a>(
    devices: impl IntoIterator<Item = &'a Device>,
    field: &str,
    page_size: usize,
    continuation: Option<&str>,
) -> Result<Page> {
    if page_size == 0 {
        return Err(DirectoryError::InvalidPageSize.into());
    }

    let mut matching = devices
        .into_iter()
        .filter(|d| continuation.map_or(true, |after| d.id.as_str() > after))
        .filter(|d| d.has_reported(field));

    let page: Vec<Device> = matching.by_ref().take(page_size).cloned().collect();
    let continuation = match (page.last(), matching.next()) {
        (Some(last), Some(_)) => Some(last.id.clone()),
        _ => None,
    };

    Ok(Page {
        devices: page,
        continuation,
    })
}

/// The etag a record carries after its next write.
pub(crate) fn next_etag(etag: &str) -> ETag {
    etag.parse::<u64>()
        .map(|v| v.saturating_add(1))
        .unwrap_or(1)
        .to_string()
}
