//! In-memory keychain for development and tests.

use crate::domain::{Capabilities, PluginHandle, RegistryError};
use crate::ports::Keychain;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Package name of the in-memory keychain plugin.
pub const KEYCHAIN_MEMORY_PACKAGE: &str = "keychain-memory";

/// In-memory keychain.
#[derive(Debug)]
pub struct InMemoryKeychain {
    keychain_id: String,
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeychain {
    /// Empty keychain.
    pub fn new(keychain_id: impl Into<String>) -> Self {
        Self {
            keychain_id: keychain_id.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registry handle exposing this keychain as `dyn Keychain`.
    pub fn into_plugin(self, instance_id: impl Into<String>) -> PluginHandle<dyn Keychain> {
        let keychain_id = self.keychain_id.clone();
        let inner: Arc<dyn Keychain> = Arc::new(self);
        PluginHandle::new(instance_id, KEYCHAIN_MEMORY_PACKAGE, Capabilities::none(), inner)
            .with_keychain_id(keychain_id)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the keychain is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl Keychain for InMemoryKeychain {
    fn keychain_id(&self) -> &str {
        &self.keychain_id
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RegistryError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RegistryError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool, RegistryError> {
        Ok(self.entries.read().contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<bool, RegistryError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}
