//! # Algorithms
//!
//! Hash-lock generation and verification.

pub mod secret;

pub use secret::*;
