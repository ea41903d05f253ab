//! # Domain Module
//!
//! Core domain types for HTLC coordination.

pub mod entities;
pub mod errors;
pub mod secure_secret;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use secure_secret::SecureSecret;
pub use value_objects::*;
