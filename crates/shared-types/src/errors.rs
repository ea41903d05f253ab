//! # Error Taxonomy
//!
//! Every subsystem error enum maps onto one `ErrorKind`, which is what binding
//! layers (HTTP, socket) switch on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a bridge error, independent of the subsystem that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed connector or runtime configuration.
    ConfigValidation,
    /// Asset, validator, plugin or HTLC absent.
    NotFound,
    /// Duplicate id or name.
    Conflict,
    /// Asset already locked.
    AlreadyLocked,
    /// Public key not in compressed SEC1 form.
    InvalidKeyFormat,
    /// Fewer valid attestations than required.
    InsufficientSignatures,
    /// Multisig without a message.
    MissingMessage,
    /// Unknown HTLC package kind.
    UnsupportedPackage,
    /// A required request argument is missing or blank.
    InvalidArgument,
    /// HTLC logic contract could not be initialized.
    InitializationFailed,
    /// A serialized record could not be decoded.
    MalformedRecord,
    /// The ledger connector failed below the business layer.
    Connector,
}

impl ErrorKind {
    /// Validation kinds are raised before any connector round-trip.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ConfigValidation
                | Self::InvalidKeyFormat
                | Self::MissingMessage
                | Self::UnsupportedPackage
                | Self::InvalidArgument
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
