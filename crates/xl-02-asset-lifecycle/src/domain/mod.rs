//! # Domain Module
//!
//! Asset records, validators, the copy payload and connector options.

pub mod copy;
pub mod entities;
pub mod errors;
pub mod options;

pub use copy::*;
pub use entities::*;
pub use errors::*;
pub use options::*;
