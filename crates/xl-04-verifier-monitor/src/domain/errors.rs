//! # Domain Errors

use shared_types::ErrorKind;
use thiserror::Error;
use xl_05_plugin_registry::RegistryError;

/// Monitor errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonitorError {
    /// Required argument missing or blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Block source failed.
    #[error("Block source error: {0}")]
    Source(String),

    /// Transaction payload could not be decoded.
    #[error("Malformed transaction payload: {0}")]
    MalformedPayload(String),

    /// Business-logic plugin rejected an event.
    #[error("Business logic error: {0}")]
    Plugin(String),

    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl MonitorError {
    /// Shared error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Source(_) | Self::Plugin(_) => ErrorKind::Connector,
            Self::MalformedPayload(_) => ErrorKind::MalformedRecord,
            Self::Registry(e) => e.kind(),
        }
    }
}
