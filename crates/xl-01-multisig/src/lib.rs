//! # XL-01 Multisig Verification
//!
//! Verifies a set of `(public key, signature)` attestations over one message.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Signature Schemes
//!
//! Ledger families sign attestations differently, so the verifier is
//! pluggable per [`SignatureScheme`]:
//!
//! | Scheme | Curve | Prehash | Ledgers |
//! |--------|-------|---------|---------|
//! | `Secp256k1Sha256` | secp256k1 | SHA-256 | Fabric, Sawtooth |
//! | `Secp256k1Keccak256` | secp256k1 | Keccak-256 | Besu, Quorum, Ethereum |
//! | `Ed25519` | Curve25519 | none (pure Ed25519) | Corda |
//!
//! Keys and signatures travel as hex strings (optional `0x` prefix).
//! secp256k1 signatures are 64-byte `r || s`, optionally followed by a
//! recovery byte which is ignored.
//!
//! ## Result Contract
//!
//! - A missing or empty message is a [`MultisigError::MissingMessage`].
//! - Otherwise one `bool` per attestation, in insertion order.
//! - Malformed keys or signatures verify as `false`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    eth_address, keccak256, parse_compressed_public_key, public_key_hex, sha256, sign_message,
    Ed25519Verifier, Multisig, MultisigError, Secp256k1Verifier, SignatureEntry, SignatureScheme,
};
pub use ports::{MultisigApi, SignatureVerifier};
pub use service::MultisigEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
