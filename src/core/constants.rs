//! Constants used throughout keyfleet.
//!
//! Centralizes field names, defaults, and policy bounds.

/// Default configuration file name.
pub const CONFIG_FILE: &str = "keyfleet.toml";

/// Default root of the filesystem secret store.
pub const DEFAULT_STORE_PATH: &str = ".keyfleet/secrets";

/// Default location of the JSON device directory.
pub const DEFAULT_DIRECTORY_PATH: &str = ".keyfleet/devices.json";

/// Shortest accepted key name.
pub const MIN_NAME_LENGTH: usize = 5;

/// Default longest accepted key name.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 20;

/// Upper bound a policy may raise the maximum name length to.
pub const MAX_NAME_LENGTH_LIMIT: usize = 36;

/// Size of a provisioned symmetric key in bytes (256 bits).
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// Bytes of padding overhead for RSA PKCS#1 v1.5 encryption.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Largest accepted recipient modulus, in bits.
pub const MAX_MODULUS_BITS: usize = 16384;

/// Request field carrying the key name.
pub const FIELD_KEY_NAME: &str = "key_name";

/// Request field carrying the recipient public key.
pub const FIELD_CLIENT_PUBLIC_KEY: &str = "client_public_key";

/// Reported device property holding the device public key.
pub const DEFAULT_REPORTED_FIELD: &str = "device_public_key";

/// Desired device property receiving the wrapped key bundle.
pub const DEFAULT_DESIRED_PROPERTY: &str = "confidential_package_keys";

/// Store entries that are infrastructure configuration, not payloads.
pub const DEFAULT_RESERVED_NAMES: &[&str] = &["HubConnectionString", "KeyVaultEndpoint"];

/// Devices fetched per directory page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Seconds between scheduled distribution runs.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;
