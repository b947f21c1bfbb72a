//! Recipient public keys.
//!
//! Parses and validates untrusted base64 SubjectPublicKeyInfo blobs. Only
//! rsaEncryption keys with a usable modulus of up to `MAX_MODULUS_BITS` get
//! through; anything else is reported as a single field error and never
//! reaches the cipher.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs8::der::asn1::{AnyRef, Null};
use rsa::pkcs8::{spki, EncodePublicKey, SubjectPublicKeyInfoRef};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::core::config::NamePolicy;
use crate::core::constants::{FIELD_CLIENT_PUBLIC_KEY, MAX_MODULUS_BITS, PKCS1_V15_OVERHEAD};
use crate::core::validation::validate_key_name;
use crate::error::{FieldError, Result, ValidationErrors};

const REQUIRED_MESSAGE: &str = "ClientPublicKey is required";
const INVALID_MESSAGE: &str =
    "ClientPublicKey needs to be a valid base64 encoded string of a RSA public key";

/// Why a public key blob was rejected. Logged, never shown to callers.
#[derive(Error, Debug)]
pub enum KeyParseError {
    #[error("not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("not a SubjectPublicKeyInfo: {0}")]
    Spki(#[from] spki::Error),

    #[error("algorithm parameters must be NULL for rsaEncryption")]
    Parameters,

    #[error("not an RSAPublicKey: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    #[error("RSA modulus is zero")]
    ZeroModulus,

    #[error("unusable RSA key: {0}")]
    Rsa(#[from] rsa::Error),
}

/// A validated RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: RsaPublicKey,
    der: Vec<u8>,
}

impl PublicKey {
    /// Parse DER-encoded SubjectPublicKeyInfo.
    ///
    /// Accepts moduli up to `MAX_MODULUS_BITS`, above the 4096-bit default
    /// of `RsaPublicKey::new`.
    pub fn from_der(der: &[u8]) -> std::result::Result<Self, KeyParseError> {
        let info = SubjectPublicKeyInfoRef::try_from(der)?;
        info.algorithm.assert_algorithm_oid(rsa::pkcs1::ALGORITHM_OID)?;
        if let Some(params) = info.algorithm.parameters {
            if params != AnyRef::from(Null) {
                return Err(KeyParseError::Parameters);
            }
        }

        let bits = info
            .subject_public_key
            .as_bytes()
            .ok_or(spki::Error::KeyMalformed)?;
        let key = rsa::pkcs1::RsaPublicKey::try_from(bits)?;
        let n = BigUint::from_bytes_be(key.modulus.as_bytes());
        if n.bits() == 0 {
            return Err(KeyParseError::ZeroModulus);
        }
        let e = BigUint::from_bytes_be(key.public_exponent.as_bytes());
        let inner = RsaPublicKey::new_with_max_size(n, e, MAX_MODULUS_BITS)?;

        Ok(Self {
            inner,
            der: der.to_vec(),
        })
    }

    /// Decode base64 (surrounding whitespace ignored), then parse as DER.
    pub fn from_base64(blob: &str) -> std::result::Result<Self, KeyParseError> {
        let der = STANDARD.decode(blob.trim())?;
        Self::from_der(&der)
    }

    /// Wrap an existing RSA key.
    pub fn from_rsa(inner: RsaPublicKey) -> std::result::Result<Self, KeyParseError> {
        let der = inner.to_public_key_der()?.as_bytes().to_vec();
        Ok(Self { inner, der })
    }

    /// The underlying RSA key.
    pub fn as_rsa(&self) -> &RsaPublicKey {
        &self.inner
    }

    /// Modulus length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Largest plaintext PKCS#1 v1.5 can encrypt under this key.
    pub fn capacity(&self) -> usize {
        self.modulus_len().saturating_sub(PKCS1_V15_OVERHEAD)
    }

    /// Standard base64 of the DER encoding.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.der)
    }

    /// Short SHA-256 fingerprint of the DER encoding, for display.
    pub fn fingerprint(&self) -> String {
        Sha256::digest(&self.der)
            .iter()
            .take(8)
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

/// Validate an optional base64 public key blob.
///
/// When `required` is false an absent or blank blob is fine and yields no
/// key. Otherwise the blob must decode and parse as an RSA public key.
///
/// # Errors
///
/// Returns one `FieldError` on `client_public_key`.
pub fn validate_public_key(
    blob: Option<&str>,
    required: bool,
) -> std::result::Result<Option<PublicKey>, FieldError> {
    let blob = match blob {
        Some(b) if !b.trim().is_empty() => b,
        _ if required => {
            return Err(FieldError::new(FIELD_CLIENT_PUBLIC_KEY, REQUIRED_MESSAGE));
        }
        _ => return Ok(None),
    };

    match PublicKey::from_base64(blob) {
        Ok(key) => Ok(Some(key)),
        Err(e) => {
            debug!(error = %e, "rejected client public key");
            Err(FieldError::new(FIELD_CLIENT_PUBLIC_KEY, INVALID_MESSAGE))
        }
    }
}

/// A device or caller: a policy-checked name plus a validated public key.
#[derive(Debug, Clone)]
pub struct Recipient {
    name: String,
    public_key: PublicKey,
}

impl Recipient {
    /// Create a recipient, checking the name against `policy` and the
    /// public key blob.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` carrying every name and key problem.
    pub fn new(name: &str, blob: Option<&str>, policy: &NamePolicy) -> Result<Self> {
        let mut errors = validate_key_name(Some(name), policy);
        let public_key = validate_public_key(blob, true).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        match public_key {
            Some(public_key) if errors.is_empty() => Ok(Self {
                name: name.to_string(),
                public_key,
            }),
            _ => Err(ValidationErrors(errors).into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}
