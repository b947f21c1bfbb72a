//! RSA PKCS#1 v1.5 wrapping backend.

use rand::rngs::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::recipient::PublicKey;
use crate::error::{CipherError, Result};

/// RSA encryption with PKCS#1 v1.5 padding.
pub struct Pkcs1v15;

impl Cipher for Pkcs1v15 {
    type Recipient = PublicKey;
    type Identity = RsaPrivateKey;

    fn wrap(&self, plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>> {
        let max = recipient.capacity();
        if plaintext.len() > max {
            return Err(CipherError::PlaintextTooLarge {
                len: plaintext.len(),
                max,
            }
            .into());
        }

        trace!(
            plaintext_len = plaintext.len(),
            modulus_len = recipient.modulus_len(),
            "wrapping"
        );

        let wrapped = recipient
            .as_rsa()
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = wrapped.len(), "wrapped");
        Ok(wrapped)
    }

    fn unwrap(&self, ciphertext: &[u8], identity: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = ciphertext.len(), "unwrapping");

        let plaintext = identity
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        Ok(Zeroizing::new(plaintext))
    }
}
