//! # Domain Module
//!
//! Blocks, events and the per-client session state.

pub mod entities;
pub mod errors;
pub mod session;
pub mod subscription;

pub use entities::*;
pub use errors::*;
pub use session::VerifierSession;
pub use subscription::MonitorSubscription;
