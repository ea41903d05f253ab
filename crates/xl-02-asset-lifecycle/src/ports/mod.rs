//! # Ports Module
//!
//! Inbound protocol API and the outbound ledger connector.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
