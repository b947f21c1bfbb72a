//! Error types for keyfleet.
//!
//! A top-level [`Error`] wraps one enum per concern. Validation failures are
//! the only client-side errors; everything else is reported as a server
//! error with the detail kept in the logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller-facing classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Bad input; the caller can fix the request.
    ClientError,
    /// Anything else; details stay in the operational logs.
    ServerError,
}

impl Error {
    /// Classify this error for the caller.
    pub fn status(&self) -> Status {
        match self {
            Error::Validation(_) => Status::ClientError,
            _ => Status::ServerError,
        }
    }

    /// Field errors carried by a validation failure, if any.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Error::Validation(errors) => Some(errors.as_slice()),
            _ => None,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more field errors collected from a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {}", join(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("config file already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Secret lookup errors.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret {0} is not valid base64")]
    Malformed(String),
}

/// Wrapping errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("plaintext of {len} bytes exceeds key capacity of {max} bytes")]
    PlaintextTooLarge { len: usize, max: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Secret store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid secret name for this store: {0}")]
    InvalidName(String),

    #[error("secret store unavailable: {0}")]
    Unavailable(String),

    #[error("secret store io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device directory errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("device already enrolled: {0}")]
    AlreadyEnrolled(String),

    #[error("device directory unavailable: {0}")]
    Unavailable(String),

    #[error("device directory io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse device directory: {0}")]
    Parse(#[from] serde_json::Error),
}
