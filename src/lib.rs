//! keyfleet - Provision symmetric keys and distribute them to a device fleet.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write a default keyfleet.toml
//! │   ├── keys          # provision / wrap
//! │   ├── distribute    # One run or the scheduled loop
//! │   ├── secrets       # Store listing
//! │   ├── device        # Directory enrollment and inspection
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # keyfleet.toml management
//!     ├── validation    # Key name rules
//!     ├── recipient     # RSA public key validation
//!     ├── cipher/       # Wrapping backends
//!     │   ├── mod       # Cipher trait
//!     │   └── pkcs1     # RSA PKCS#1 v1.5
//!     ├── store/        # Secret store backends
//!     ├── directory/    # Device directory backends
//!     ├── service/      # Provision and wrap operations
//!     └── distribute    # Fan-out to every device
//! ```
//!
//! # Features
//!
//! - 256-bit keys from the OS random source
//! - Untrusted SubjectPublicKeyInfo validation before any cryptography
//! - Per-device wrapping with partial-failure tolerance
//! - Optimistic-concurrency writes to device records

pub mod cli;
pub mod core;
pub mod error;
