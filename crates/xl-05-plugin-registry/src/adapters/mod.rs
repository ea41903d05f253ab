//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the registry's outbound ports.

mod keychain;

pub use keychain::{InMemoryKeychain, KEYCHAIN_MEMORY_PACKAGE};
