//! # Domain Module
//!
//! Plugin identity, capability tags and registry errors.

pub mod errors;
pub mod plugin;

pub use errors::*;
pub use plugin::*;
