//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret or device name (5 to 20 characters by default).
pub type KeyName = String;

/// A device identifier in the directory. Shares KeyName rules when validated.
pub type DeviceId = String;

/// Opaque optimistic-concurrency token carried with a device record.
pub type ETag = String;

/// A base64-encoded value (stored secret, wrapped key, or public key blob).
pub type Base64 = String;

/// A JSON property bag on a device record.
pub type Properties = serde_json::Map<String, serde_json::Value>;
