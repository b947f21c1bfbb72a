//! Key wrapping.
//!
//! Provides the wrapping abstraction and its RSA implementation.
//!
//! ## Backends
//!
//! - **PKCS#1 v1.5**: Default, always available. Legacy RSA padding kept for
//!   compatibility with constrained-device RSA stacks. No OAEP.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file (e.g., `oaep.rs`)
//! 3. Re-export from this module

use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::core::recipient::PublicKey;
use crate::error::Result;

mod pkcs1;

pub use pkcs1::Pkcs1v15;

/// Wrapping backend trait.
///
/// Wraps a symmetric secret for a single recipient so that only the holder
/// of the matching private key can recover it.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt `plaintext` for `recipient`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::PlaintextTooLarge` if the recipient key cannot
    /// hold the plaintext, or `CipherError::EncryptionFailed` otherwise.
    fn wrap(&self, plaintext: &[u8], recipient: &Self::Recipient) -> Result<Vec<u8>>;

    /// Recover the plaintext from `ciphertext` with the private `identity`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the key doesn't match
    /// or the ciphertext is corrupt.
    fn unwrap(&self, ciphertext: &[u8], identity: &Self::Identity)
        -> Result<Zeroizing<Vec<u8>>>;
}

/// Wrap `plaintext` for `recipient` with the default PKCS#1 v1.5 backend.
pub fn wrap(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>> {
    Pkcs1v15.wrap(plaintext, recipient)
}

/// Unwrap `ciphertext` with the default PKCS#1 v1.5 backend.
pub fn unwrap(ciphertext: &[u8], identity: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    Pkcs1v15.unwrap(ciphertext, identity)
}
