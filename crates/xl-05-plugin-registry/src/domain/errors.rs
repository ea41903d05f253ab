//! # Domain Errors

use shared_types::ErrorKind;
use thiserror::Error;

/// Plugin registry errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No plugin matched the lookup.
    #[error("Plugin not found: {0}")]
    NotFound(String),

    /// A plugin with the same package name or instance id is already registered.
    #[error("Plugin already registered: {0}")]
    Conflict(String),

    /// The plugin exists but does not expose the requested interface.
    #[error("Plugin {instance_id} does not provide {expected}")]
    TypeMismatch {
        /// Instance id of the plugin found
        instance_id: String,
        /// Requested interface
        expected: &'static str,
    },

    /// Keychain backend failure.
    #[error("Keychain error: {0}")]
    Keychain(String),
}

impl RegistryError {
    /// Shared error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::TypeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::Keychain(_) => ErrorKind::Connector,
        }
    }
}
