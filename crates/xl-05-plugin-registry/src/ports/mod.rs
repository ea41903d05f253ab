//! # Ports Module
//!
//! Outbound port for credential storage.

pub mod keychain;

pub use keychain::*;
