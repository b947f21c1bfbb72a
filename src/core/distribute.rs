//! Fan-out distribution of every secret to every enrolled device.
//!
//! A run reads the distributable secrets once, walks the directory page by
//! page, and writes each device its own wrapped bundle. A bad device is
//! logged and skipped; only a store or directory failure ends the run.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::config::{DistributionConfig, NamePolicy};
use crate::core::directory::{DeviceDirectory, UpdateOutcome};
use crate::core::domain::{Device, DistributionSummary};
use crate::core::recipient::Recipient;
use crate::core::store::SecretStore;
use crate::core::types::{KeyName, Properties};
use crate::error::{Error, Result};

/// Secret plaintexts for the lifetime of one run.
type SecretSet = BTreeMap<KeyName, Zeroizing<Vec<u8>>>;

/// What happened to a single device.
#[derive(Debug)]
enum DeviceOutcome {
    Updated,
    InvalidKey(Error),
    Conflict,
    Failed(Error),
}

/// Distributes wrapped secrets from a store to a device directory.
pub struct Distributor<'a> {
    store: &'a dyn SecretStore,
    directory: &'a dyn DeviceDirectory,
    settings: DistributionConfig,
    policy: NamePolicy,
    interval: Duration,
}

impl std::fmt::Debug for Distributor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Distributor")
            .field("store", &self.store.location())
            .field("settings", &self.settings)
            .field("policy", &self.policy)
            .field("interval", &self.interval)
            .finish()
    }
}

impl<'a> Distributor<'a> {
    pub fn new(
        store: &'a dyn SecretStore,
        directory: &'a dyn DeviceDirectory,
        settings: DistributionConfig,
    ) -> Self {
        let interval = settings.interval();
        Self {
            store,
            directory,
            settings,
            policy: NamePolicy::default(),
            interval,
        }
    }

    /// Check device ids against `policy` instead of the default bounds.
    pub fn with_policy(mut self, policy: NamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the pause between scheduled runs.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Wrap every distributable secret for every device with a public key.
    ///
    /// # Errors
    ///
    /// Returns an error only if listing or reading secrets fails, or if a
    /// directory page cannot be fetched. Devices already written stay
    /// written.
    pub fn distribute_all(&self) -> Result<DistributionSummary> {
        let mut summary = DistributionSummary::new(Utc::now());
        info!(started_at = %summary.started_at, "distribution run started");

        let secrets = self.load_secrets(&mut summary)?;
        summary.secrets = secrets.len();
        info!("obtained {} key(s) for distribution", secrets.len());

        let field = self.settings.reported_field.as_str();
        let mut continuation: Option<String> = None;
        loop {
            let page = self.directory.query_devices(
                field,
                self.settings.page_size,
                continuation.as_deref(),
            )?;
            summary.pages += 1;
            debug!(page = summary.pages, devices = page.devices.len(), "fetched page");

            for device in &page.devices {
                summary.devices_seen += 1;
                match self.distribute_to(device, &secrets) {
                    DeviceOutcome::Updated => summary.devices_updated += 1,
                    DeviceOutcome::InvalidKey(e) => {
                        error!(
                            device = %device.id,
                            error = %e,
                            "failed to distribute key(s) to device, invalid device id or public key"
                        );
                        summary.invalid_key.push(device.id.clone());
                    }
                    DeviceOutcome::Conflict => {
                        warn!(
                            device = %device.id,
                            "device changed since it was read, skipping until next run"
                        );
                        summary.conflicts.push(device.id.clone());
                    }
                    DeviceOutcome::Failed(e) => {
                        error!(device = %device.id, error = %e, "failed to distribute key(s) to device");
                        summary.failed.push(device.id.clone());
                    }
                }
            }

            continuation = page.continuation;
            if continuation.is_none() {
                break;
            }
        }

        info!(
            secrets = summary.secrets,
            pages = summary.pages,
            devices = summary.devices_seen,
            updated = summary.devices_updated,
            skipped = summary.devices_skipped(),
            "distribution run finished"
        );
        Ok(summary)
    }

    /// Run `distribute_all` on the configured interval.
    ///
    /// A failed run is logged and handed to `on_run`; the next tick still
    /// happens. Stops after `max_runs` runs, or never with `None`.
    pub fn watch<F>(&self, max_runs: Option<usize>, mut on_run: F)
    where
        F: FnMut(usize, &Result<DistributionSummary>),
    {
        let mut run = 0;
        loop {
            run += 1;
            let result = self.distribute_all();
            if let Err(e) = &result {
                error!(run, error = %e, "distribution run failed");
            }
            on_run(run, &result);

            if max_runs.is_some_and(|max| run >= max) {
                break;
            }
            std::thread::sleep(self.interval);
        }
    }

    /// Read every non-reserved secret once.
    fn load_secrets(&self, summary: &mut DistributionSummary) -> Result<SecretSet> {
        let mut secrets = SecretSet::new();
        for name in self.store.list_secret_names()? {
            if self.settings.is_reserved(&name) {
                debug!(secret = %name, "skipping reserved secret");
                continue;
            }

            let value = self.store.get_secret_value(&name)?;
            match STANDARD.decode(value.as_str()) {
                Ok(bytes) => {
                    secrets.insert(name, Zeroizing::new(bytes));
                }
                Err(_) => {
                    error!(secret = %name, "stored value is not valid base64, not distributing it");
                    summary.skipped_secrets.push(name);
                }
            }
        }
        Ok(secrets)
    }

    /// Wrap the secret set for one device and write it back.
    fn distribute_to(&self, device: &Device, secrets: &SecretSet) -> DeviceOutcome {
        info!(device = %device.id, "distributing key(s) to device");

        let blob = device.reported_text(&self.settings.reported_field);
        let recipient = match Recipient::new(&device.id, blob.as_deref(), &self.policy) {
            Ok(recipient) => recipient,
            Err(e) => return DeviceOutcome::InvalidKey(e),
        };
        debug!(
            device = %recipient.name(),
            key = %recipient.public_key().fingerprint(),
            "device key validated"
        );

        let mut bundle = serde_json::Map::new();
        for (name, plaintext) in secrets {
            match cipher::wrap(plaintext, recipient.public_key()) {
                Ok(wrapped) => {
                    bundle.insert(name.clone(), Value::String(STANDARD.encode(wrapped)));
                }
                Err(e) => return DeviceOutcome::Failed(e),
            }
        }

        let mut desired: Properties = device.desired.clone();
        desired.insert(self.settings.desired_property.clone(), Value::Object(bundle));

        match self.directory.update_device(&device.id, &desired, &device.etag) {
            Ok(UpdateOutcome::Updated { etag }) => {
                debug!(device = %device.id, etag = %etag, "device updated");
                DeviceOutcome::Updated
            }
            Ok(UpdateOutcome::Conflict) => DeviceOutcome::Conflict,
            Err(e) => DeviceOutcome::Failed(e),
        }
    }
}
