//! Test fixtures and constants.

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rsa::pkcs8::EncodePublicKey;
use rsa::RsaPrivateKey;

/// Key names used across tests.
pub const KEY_A: &str = "device-key-001";
pub const KEY_B: &str = "device-key-002";

/// A blob that is not base64 at all.
pub const INVALID_PUBLIC_KEY: &str = "not-base64";

/// Store entries distribution must never ship.
pub const RESERVED: &[&str] = &["HubConnectionString", "KeyVaultEndpoint"];

/// A 2048-bit device keypair, generated once per test binary.
pub fn device_keypair() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("failed to generate RSA key"))
}

/// A second, unrelated 1024-bit keypair.
pub fn other_keypair() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 1024).expect("failed to generate RSA key"))
}

/// Base64 SubjectPublicKeyInfo of a keypair's public half.
pub fn public_key_b64(key: &RsaPrivateKey) -> String {
    let der = key
        .to_public_key()
        .to_public_key_der()
        .expect("failed to encode public key");
    STANDARD.encode(der.as_bytes())
}

/// Decode base64 and decrypt with `key`.
pub fn unwrap_b64(wrapped: &str, key: &RsaPrivateKey) -> Vec<u8> {
    let ciphertext = STANDARD.decode(wrapped.trim()).expect("wrapped key is not base64");
    keyfleet::core::cipher::unwrap(&ciphertext, key)
        .expect("failed to unwrap")
        .to_vec()
}
