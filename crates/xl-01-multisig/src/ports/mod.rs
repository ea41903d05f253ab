//! # Ports Module
//!
//! Inbound multisig API and the outbound per-scheme verifier.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
