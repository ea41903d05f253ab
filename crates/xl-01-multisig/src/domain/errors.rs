//! # Domain Errors

use shared_types::ErrorKind;
use thiserror::Error;

/// Multisig errors.
///
/// Per-attestation failures are never errors; they verify as `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultisigError {
    /// The multisig carries no message.
    #[error("Multisig message required to verify commitments")]
    MissingMessage,

    /// Public key is not a compressed curve point.
    #[error("Public key is expected in compressed format: {0}")]
    InvalidKeyFormat(String),

    /// Private key could not be parsed.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl MultisigError {
    /// Shared error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingMessage => ErrorKind::MissingMessage,
            Self::InvalidKeyFormat(_) => ErrorKind::InvalidKeyFormat,
            Self::InvalidPrivateKey | Self::SigningFailed(_) => ErrorKind::InvalidArgument,
        }
    }
}
