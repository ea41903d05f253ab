//! # Ports Layer
//!
//! Inbound (API) and outbound (SPI) port definitions.

pub mod inbound;
pub mod outbound;

pub use inbound::HtlcCoordinatorApi;
pub use outbound::{ledger_connector, HtlcLedgerConnector, HtlcPackageStrategy};
