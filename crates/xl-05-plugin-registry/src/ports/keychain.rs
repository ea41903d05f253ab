//! # Keychain Port

use crate::domain::RegistryError;
use async_trait::async_trait;

/// Credential storage - outbound port.
///
/// Backends (vault, cloud KMS, in-memory) live outside the bridge core; the
/// HTLC coordinator resolves signing keys through this trait.
#[async_trait]
pub trait Keychain: Send + Sync {
    /// Keychain id used for lookups.
    fn keychain_id(&self) -> &str;

    /// Read an entry.
    async fn get(&self, key: &str) -> Result<Option<String>, RegistryError>;

    /// Write an entry.
    async fn set(&self, key: &str, value: &str) -> Result<(), RegistryError>;

    /// Membership test.
    async fn has(&self, key: &str) -> Result<bool, RegistryError>;

    /// Remove an entry, returning whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, RegistryError>;
}
