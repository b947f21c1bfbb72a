//! The user-facing key operations.
//!
//! `KeyService` borrows a secret store and runs provision and wrap requests
//! against it, each as a single sequential pipeline.

mod provision;
mod wrap;

use crate::core::config::NamePolicy;
use crate::core::store::SecretStore;

/// Provision and wrap operations over a secret store.
pub struct KeyService<'a> {
    store: &'a dyn SecretStore,
    policy: NamePolicy,
}

impl std::fmt::Debug for KeyService<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyService")
            .field("store", &self.store.location())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<'a> KeyService<'a> {
    pub fn new(store: &'a dyn SecretStore, policy: NamePolicy) -> Self {
        Self { store, policy }
    }
}
