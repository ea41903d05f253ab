//! # XL-03 HTLC Coordinator
//!
//! Coordinates both legs of a hash time-locked atomic swap across two
//! ledgers, each leg running on an HTLC package chosen per request.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Leg State Machine
//!
//! ```text
//! Uninitialized ──initialize──▶ Initialized ──new_contract──▶ Funded
//!                                   │                           │
//!                                   └────────▶ Abandoned ◀──────┤ (refund / expiry)
//!                                                               ▼
//!                                                           Withdrawn
//! ```
//!
//! ## Packages
//!
//! | Package | Registry package name | Extra terms |
//! |---------|-----------------------|-------------|
//! | `Besu` | `htlc-eth-besu` | none |
//! | `BesuErc20` | `htlc-eth-besu-erc20` | `token_address` |
//!
//! Strategies are resolved from the plugin registry on every call, and they
//! resolve their ledger connector by instance id on every call.
//!
//! ## Module Structure
//!
//! ```text
//! xl-03-htlc-coordinator/
//! ├── domain/        # Requests, receipts, leg state, errors, SecureSecret
//! ├── algorithms/    # Hash-lock helpers
//! ├── ports/         # HtlcCoordinatorApi, HtlcPackageStrategy, HtlcLedgerConnector
//! ├── adapters/      # Besu/BesuErc20 packages, InMemoryHtlcLedger
//! └── service.rs     # HtlcCoordinator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{BesuErc20HtlcPackage, BesuHtlcPackage, InMemoryHtlcLedger};
pub use algorithms::{create_hash_lock, generate_random_secret, verify_secret};
pub use domain::{
    CounterpartyHtlcRequest, HtlcError, HtlcLegState, HtlcPackage, HtlcStatus, HtlcTerms,
    OwnHtlcRequest, OwnHtlcResponse, ResolvedCredential, SecureSecret, SigningCredential,
    TransactionReceipt, WithdrawCounterpartyRequest,
};
pub use ports::{HtlcCoordinatorApi, HtlcLedgerConnector, HtlcPackageStrategy};
pub use service::HtlcCoordinator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
