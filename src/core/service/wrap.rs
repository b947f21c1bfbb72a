//! Wrapping a stored secret for one recipient.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{error, info};
use zeroize::Zeroizing;

use super::KeyService;
use crate::core::api::{KeyRequest, Response};
use crate::core::cipher;
use crate::core::recipient::validate_public_key;
use crate::core::validation::validate_key_name;
use crate::error::{Result, SecretError, ValidationErrors};

impl KeyService<'_> {
    /// Wrap the named secret for the request's public key.
    ///
    /// Read-only: nothing in the store changes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` carrying every name and key problem,
    /// before the store is touched. Returns `SecretError::NotFound` if
    /// the secret was never provisioned, and `CipherError` if the key is too
    /// small for the secret.
    pub fn wrap_for_recipient(&self, request: &KeyRequest) -> Result<Response> {
        let name = request.key_name.as_deref();

        let mut errors = validate_key_name(name, &self.policy);
        let public_key = validate_public_key(request.client_public_key.as_deref(), true)
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            });

        let (name, public_key) = match (name, public_key) {
            (Some(name), Some(key)) if errors.is_empty() => (name, key),
            _ => return Err(ValidationErrors(errors).into()),
        };

        let stored = self.store.get_secret_value(name).map_err(|e| {
            error!(key = %name, error = %e, "failed to read secret");
            e
        })?;
        let plaintext = Zeroizing::new(
            STANDARD
                .decode(stored.as_str())
                .map_err(|_| SecretError::Malformed(name.to_string()))?,
        );

        let wrapped = cipher::wrap(&plaintext, &public_key).map_err(|e| {
            error!(key = %name, error = %e, "failed to wrap secret");
            e
        })?;

        info!(key = %name, recipient = %public_key.fingerprint(), "wrapped key");
        Ok(Response::wrapped_key(STANDARD.encode(wrapped)))
    }
}
