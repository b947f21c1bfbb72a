//! Device commands - enroll, list, and show directory records.

use std::path::Path;

use serde_json::json;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::domain::Device;
use crate::core::recipient::{validate_public_key, PublicKey};
use crate::core::validation::{into_result, validate_key_name};
use crate::error::{DirectoryError, Result};

/// Enroll a device, validating its id and public key first.
pub fn enroll(config: Option<&Path>, id: &str, public_key: &str, force: bool) -> Result<()> {
    let ctx = Context::load(config)?;

    let mut errors = validate_key_name(Some(id), &ctx.config.policy);
    let key = match validate_public_key(Some(public_key), true) {
        Ok(key) => key,
        Err(e) => {
            errors.push(e);
            None
        }
    };
    into_result(errors)?;

    let directory = ctx.directory();
    let device = directory.enroll(
        id,
        &ctx.config.distribution.reported_field,
        public_key.trim(),
        force,
    )?;

    let fingerprint = key.map(|k| k.fingerprint()).unwrap_or_default();
    output::success(&format!(
        "enrolled {} (key {}, etag {})",
        output::name(&device.id),
        fingerprint,
        device.etag
    ));
    Ok(())
}

/// List enrolled devices with key fingerprints and bundle sizes.
pub fn list(config: Option<&Path>, json: bool) -> Result<()> {
    let ctx = Context::load(config)?;
    let devices = ctx.directory().devices()?;
    let settings = &ctx.config.distribution;

    if json {
        let rows: Vec<_> = devices
            .iter()
            .map(|d| {
                json!({
                    "id": d.id,
                    "etag": d.etag,
                    "fingerprint": fingerprint(d, &settings.reported_field),
                    "keys": bundle_len(d, &settings.desired_property),
                })
            })
            .collect();
        output::data(&serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if devices.is_empty() {
        output::dimmed("no devices enrolled");
        output::hint("next: keyfleet device enroll <ID> <PUBLIC_KEY>");
        return Ok(());
    }

    output::header(&format!("devices ({})", output::count(devices.len())));
    for device in &devices {
        let key = fingerprint(device, &settings.reported_field)
            .unwrap_or_else(|| "invalid key".to_string());
        let keys = bundle_len(device, &settings.desired_property)
            .map(|n| format!("{} key(s)", n))
            .unwrap_or_else(|| "no bundle".to_string());
        output::list_item(&format!(
            "{}  {}  etag {}  {}",
            output::name(&device.id),
            key,
            device.etag,
            keys
        ));
    }
    Ok(())
}

/// Print one device record as JSON.
pub fn show(config: Option<&Path>, id: &str) -> Result<()> {
    let ctx = Context::load(config)?;
    let device = ctx
        .directory()
        .get(id)?
        .ok_or_else(|| DirectoryError::DeviceNotFound(id.to_string()))?;
    output::data(&serde_json::to_string_pretty(&device)?);
    Ok(())
}

fn fingerprint(device: &Device, field: &str) -> Option<String> {
    let blob = device.reported_text(field)?;
    PublicKey::from_base64(&blob).ok().map(|k| k.fingerprint())
}

fn bundle_len(device: &Device, property: &str) -> Option<usize> {
    device
        .desired
        .get(property)
        .and_then(|v| v.as_object())
        .map(|bundle| bundle.len())
}
