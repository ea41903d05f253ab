//! # XL-02 Asset Lifecycle
//!
//! Cross-ledger asset records and the protocol that moves them between
//! ledgers under threshold attestation.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Operations
//!
//! | Operation | Fails with |
//! |-----------|------------|
//! | `create_asset` | `Conflict` when the id exists |
//! | `lock_asset` | `NotFound`, `AlreadyLocked` |
//! | `set_property` | `NotFound` for unknown asset or key |
//! | `get_asset` | `NotFound` |
//! | `copy_asset` | `InsufficientSignatures`, `Conflict` on replay |
//! | `add_foreign_validator` | `InvalidKeyFormat`, `Conflict` on duplicate name |
//!
//! Every operation resolves its connector through the plugin registry and
//! re-validates the connector options before touching the ledger, so options
//! mutated at runtime are caught on the next call.
//!
//! ## Module Structure
//!
//! ```text
//! xl-02-asset-lifecycle/
//! ├── domain/      # Asset, ForeignValidator, copy payload, options, errors
//! ├── ports/       # AssetLifecycleApi, AssetLedgerConnector
//! ├── adapters/    # InMemoryAssetLedger
//! └── service.rs   # AssetLifecycleService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryAssetLedger;
pub use domain::{
    Asset, AssetError, AssetOperation, AssetOrigin, ConfigErrorClass, ConnectorOptions,
    CopyAssetRequest, CopyPayload, ForeignValidator, OperationAck, OptionsError,
    ValidatedOptions,
};
pub use ports::{AssetLedgerConnector, AssetLifecycleApi};
pub use service::AssetLifecycleService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
