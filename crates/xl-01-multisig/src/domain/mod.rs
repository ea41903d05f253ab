//! # Domain Module
//!
//! Multisig message, signature schemes and key helpers.

pub mod errors;
pub mod keys;
pub mod message;
pub mod schemes;

pub use errors::*;
pub use keys::*;
pub use message::*;
pub use schemes::*;
