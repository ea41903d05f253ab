//! # Adapters Layer
//!
//! Package strategies and the in-memory HTLC ledger.

mod htlc_ledger;
mod packages;

pub use htlc_ledger::{InMemoryHtlcLedger, HTLC_LEDGER_MEMORY_PACKAGE};
pub use packages::{BesuErc20HtlcPackage, BesuHtlcPackage};
