//! Secret store.
//!
//! The store exclusively owns symmetric secret values. keyfleet creates and
//! reads them, never edits them in place.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `keyvault.rs`)
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Secret storage trait.
///
/// Values are base64 text. Implementations do no caching; every call goes to
/// the source of truth.
pub trait SecretStore {
    /// Names of every secret currently in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be reached.
    fn list_secret_names(&self) -> Result<Vec<String>>;

    /// Current value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if no such secret exists.
    fn get_secret_value(&self, name: &str) -> Result<Zeroizing<String>>;

    /// Create or replace `name` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    fn set_secret_value(&self, name: &str, value: &str) -> Result<()>;

    /// Human-readable location of the store, used in messages.
    fn location(&self) -> String;
}

impl<T: SecretStore + ?Sized> SecretStore for &T {
    fn list_secret_names(&self) -> Result<Vec<String>> {
        (**self).list_secret_names()
    }

    fn get_secret_value(&self, name: &str) -> Result<Zeroizing<String>> {
        (**self).get_secret_value(name)
    }

    fn set_secret_value(&self, name: &str, value: &str) -> Result<()> {
        (**self).set_secret_value(name, value)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
