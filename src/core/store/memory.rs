//! In-memory secret store for tests and embedding.

use std::collections::BTreeMap;
use std::sync::RwLock;

use zeroize::Zeroizing;

use super::SecretStore;
use crate::error::{Result, SecretError, StoreError};

/// Process-local secret store.
#[derive(Default)]
pub struct Memory {
    secrets: RwLock<BTreeMap<String, Zeroizing<String>>>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.len()).finish()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(name, base64)` pairs.
    pub fn with_secrets<'a>(secrets: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.secrets.write() {
            for (name, value) in secrets {
                map.insert(name.to_string(), Zeroizing::new(value.to_string()));
            }
        }
        store
    }

    /// Number of secrets held.
    pub fn len(&self) -> usize {
        self.secrets.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

impl SecretStore for Memory {
    fn list_secret_names(&self) -> Result<Vec<String>> {
        let map = self.secrets.read().map_err(|_| poisoned())?;
        Ok(map.keys().cloned().collect())
    }

    fn get_secret_value(&self, name: &str) -> Result<Zeroizing<String>> {
        let map = self.secrets.read().map_err(|_| poisoned())?;
        map.get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_string()).into())
    }

    fn set_secret_value(&self, name: &str, value: &str) -> Result<()> {
        let mut map = self.secrets.write().map_err(|_| poisoned())?;
        map.insert(name.to_string(), Zeroizing::new(value.to_string()));
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
