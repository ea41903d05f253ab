//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory asset ledger for development and tests.

mod asset_ledger;

pub use asset_ledger::{InMemoryAssetLedger, ASSET_LEDGER_MEMORY_PACKAGE};
