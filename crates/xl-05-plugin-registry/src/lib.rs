//! # XL-05 Plugin Registry
//!
//! Composition root holding every pluggable component of the bridge:
//! ledger connectors, keychains, verifiers and business-logic plugins.
//!
//! **Subsystem ID:** 05
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lookup Rules
//!
//! | Lookup | Absent result |
//! |--------|---------------|
//! | `find_one_by_id` / `find_one_by_package_name` | `None` |
//! | `get_one_by_id` / `get_one_by_package_name` | `RegistryError::NotFound` |
//! | `find_many_by_package_name` | empty `Vec` |
//! | `find_one_by_keychain_id` | `RegistryError::NotFound` |
//!
//! The registry is constructed once at startup and passed by `Arc` to the
//! services that need it. Services resolve their collaborators on every call,
//! so replacing a plugin takes effect on the next invocation.
//!
//! ## Module Structure
//!
//! ```text
//! xl-05-plugin-registry/
//! ├── domain/      # Plugin trait, capabilities, typed handles, errors
//! ├── ports/       # Keychain port
//! ├── adapters/    # InMemoryKeychain
//! └── service.rs   # PluginRegistry
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryKeychain;
pub use domain::{Capabilities, Capability, Plugin, PluginHandle, RegistryError};
pub use ports::Keychain;
pub use service::PluginRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
