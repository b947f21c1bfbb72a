//! Core library components.
//!
//! This module contains the reusable logic for key provisioning, wrapping,
//! and distribution, plus the collaborator traits it runs against.

pub mod api;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod directory;
pub mod distribute;
pub mod domain;
pub mod recipient;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
