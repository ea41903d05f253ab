//! # Domain Errors

use super::value_objects::HtlcPackage;
use shared_types::ErrorKind;
use thiserror::Error;
use xl_05_plugin_registry::RegistryError;

/// HTLC coordination errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HtlcError {
    /// Unknown package kind.
    #[error("Unrecognized HTLC Package: {0} Supported ones are: {}", HtlcPackage::supported())]
    UnsupportedPackage(String),

    /// Logic contract deployment failed or returned no address.
    #[error("HTLC initialization failed: {0}")]
    InitializationFailed(String),

    /// HTLC, contract or credential absent.
    #[error("HTLC entity not found: {0}")]
    NotFound(String),

    /// HTLC id already in use.
    #[error("HTLC already exists: {0}")]
    Conflict(String),

    /// Pre-image does not hash to the lock.
    #[error("Invalid secret")]
    InvalidSecret,

    /// Expiration passed or not in the future.
    #[error("HTLC expired: {0}")]
    Expired(String),

    /// Illegal leg state transition.
    #[error("Invalid HTLC transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: String,
        /// Attempted state
        to: String,
    },

    /// Required request argument missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Connector transport failure.
    #[error("Connector error: {0}")]
    Connector(String),
}

impl HtlcError {
    /// Shared error kind.
    ///
    /// Contract-level rejections (bad secret, expiry, illegal transition)
    /// are reported by the ledger and surface as `Connector`.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedPackage(_) => ErrorKind::UnsupportedPackage,
            Self::InitializationFailed(_) => ErrorKind::InitializationFailed,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Registry(e) => e.kind(),
            Self::InvalidSecret
            | Self::Expired(_)
            | Self::InvalidTransition { .. }
            | Self::Connector(_) => ErrorKind::Connector,
        }
    }
}
