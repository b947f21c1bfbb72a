//! Secret provisioning.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::info;
use zeroize::Zeroizing;

use super::KeyService;
use crate::core::api::{KeyRequest, Response};
use crate::core::constants::SYMMETRIC_KEY_LEN;
use crate::core::validation::{into_result, validate_key_name};
use crate::error::Result;

impl KeyService<'_> {
    /// Generate a fresh 256-bit key and store it under the requested name.
    ///
    /// An existing secret with the same name is replaced without being
    /// read first; provisioning again is how a key is rotated.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if the name is missing or out of bounds,
    /// before any key is generated. Returns a store error if the write fails.
    pub fn provision(&self, request: &KeyRequest) -> Result<Response> {
        let name = request.key_name.as_deref();
        into_result(validate_key_name(name, &self.policy))?;
        let name = name.unwrap_or_default();

        let mut secret = Zeroizing::new([0u8; SYMMETRIC_KEY_LEN]);
        OsRng.fill_bytes(&mut secret[..]);
        let encoded = Zeroizing::new(STANDARD.encode(&secret[..]));

        self.store.set_secret_value(name, &encoded)?;

        let location = self.store.location();
        info!(key = %name, store = %location, "provisioned key");
        Ok(Response::message(format!(
            "Successfully provisioned the key {} in {}.",
            name, location
        )))
    }
}
