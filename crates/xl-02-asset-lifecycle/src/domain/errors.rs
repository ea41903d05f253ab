//! # Domain Errors

use super::options::OptionsError;
use shared_types::ErrorKind;
use thiserror::Error;
use xl_01_multisig::MultisigError;
use xl_05_plugin_registry::RegistryError;

/// Asset protocol errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    /// Connector options failed validation.
    #[error(transparent)]
    Config(#[from] OptionsError),

    /// Connector could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Asset, property or validator absent.
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Duplicate asset id or validator name.
    #[error("Failed as entity already exists: {0}")]
    Conflict(String),

    /// Asset is already locked.
    #[error("Asset {0} is already locked")]
    AlreadyLocked(String),

    /// Public key is not a compressed curve point.
    #[error("Public key is expected in compressed format: {0}")]
    InvalidKeyFormat(String),

    /// Fewer valid attestations than required.
    #[error("Good signatures are less than expected: {good} < {required}")]
    InsufficientSignatures {
        /// Valid attestations from registered validators.
        good: usize,
        /// Required threshold.
        required: usize,
    },

    /// Copy message is empty.
    #[error("Multisig message required to verify commitments")]
    MissingMessage,

    /// Required argument missing or blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Copy message is not a valid asset record.
    #[error("Malformed asset record: {0}")]
    MalformedRecord(String),

    /// Connector transport failure.
    #[error("Connector error: {0}")]
    Connector(String),
}

impl AssetError {
    /// Shared error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::ConfigValidation,
            Self::Registry(e) => e.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::AlreadyLocked(_) => ErrorKind::AlreadyLocked,
            Self::InvalidKeyFormat(_) => ErrorKind::InvalidKeyFormat,
            Self::InsufficientSignatures { .. } => ErrorKind::InsufficientSignatures,
            Self::MissingMessage => ErrorKind::MissingMessage,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::MalformedRecord(_) => ErrorKind::MalformedRecord,
            Self::Connector(_) => ErrorKind::Connector,
        }
    }
}

impl From<MultisigError> for AssetError {
    fn from(err: MultisigError) -> Self {
        match err {
            MultisigError::MissingMessage => Self::MissingMessage,
            MultisigError::InvalidKeyFormat(key) => Self::InvalidKeyFormat(key),
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigErrorClass;

    #[test]
    fn test_insufficient_signatures_error() {
        let err = AssetError::InsufficientSignatures { good: 1, required: 2 };
        assert!(err.to_string().contains("Good signatures are less than expected"));
        assert_eq!(err.kind(), ErrorKind::InsufficientSignatures);
    }

    #[test]
    fn test_conflict_error() {
        let err = AssetError::Conflict("A1".to_string());
        assert!(err.to_string().contains("Failed as entity already exists"));
    }

    #[test]
    fn test_config_error_kind() {
        let err = AssetError::from(OptionsError::Missing("url"));
        assert_eq!(err.kind(), ErrorKind::ConfigValidation);
        let AssetError::Config(inner) = err else {
            panic!("expected config error");
        };
        assert_eq!(inner.class(), ConfigErrorClass::Reference);
    }

    #[test]
    fn test_registry_error_keeps_kind() {
        let err = AssetError::from(RegistryError::NotFound("c1".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_from_multisig_error() {
        assert_eq!(
            AssetError::from(MultisigError::MissingMessage),
            AssetError::MissingMessage
        );
    }
}
