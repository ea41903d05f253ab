//! # Cross-Ledger Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Multisig verification throughput
//! └── src/integration/  # Flows crossing subsystem boundaries
//!     ├── asset_flows.rs
//!     ├── htlc_swap.rs
//!     └── monitor_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p xl-tests
//! cargo test -p xl-tests integration::htlc_swap
//! cargo bench -p xl-tests
//! ```

pub mod integration;
