//! # Ports Layer
//!
//! Inbound (API) and outbound (SPI) port definitions.

pub mod inbound;
pub mod outbound;

pub use inbound::VerifierMonitorApi;
pub use outbound::{BlockSource, BusinessLogicPlugin};
