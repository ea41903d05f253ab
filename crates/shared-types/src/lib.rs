//! # Shared Types Crate
//!
//! Types shared by every bridge subsystem.
//!
//! ## Contents
//!
//! - **Ledgers**: `LedgerKind`, the family of a foreign ledger (drives the
//!   signature scheme and validator record type).
//! - **Errors**: `ErrorKind`, the single error taxonomy every subsystem error
//!   maps onto, so binding layers can translate errors uniformly.
//! - **Encoding**: hex helpers tolerant of `0x` prefixes.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::{decode_hex, encode_hex, EncodingError};
pub use entities::{Address, Hash, LedgerKind};
pub use errors::ErrorKind;
