//! # Plugin Registry Service
//!
//! Process-wide container of plugins. Constructed once by the composition
//! root and shared by `Arc`; never a hidden singleton.

use crate::domain::{Capability, Plugin, PluginHandle, RegistryError};
use crate::ports::Keychain;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Plugin registry.
///
/// Entries keep insertion order. Instance ids are unique; package names are
/// unique unless [`PluginRegistry::add`] is called with `replace_on_conflict`.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: RwLock<Vec<Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin.
    ///
    /// Returns the number of entries displaced (always 0 unless
    /// `replace_on_conflict` is set and the package name was taken).
    pub fn add(
        &self,
        plugin: Arc<dyn Plugin>,
        replace_on_conflict: bool,
    ) -> Result<usize, RegistryError> {
        let package_name = plugin.package_name().to_string();
        let instance_id = plugin.instance_id().to_string();

        let mut plugins = self.plugins.write();
        let displaced = plugins
            .iter()
            .filter(|p| p.package_name() == package_name)
            .count();

        if displaced > 0 && !replace_on_conflict {
            return Err(RegistryError::Conflict(format!(
                "package name {package_name} (pass replace_on_conflict to override)"
            )));
        }

        if plugins
            .iter()
            .any(|p| p.instance_id() == instance_id && p.package_name() != package_name)
        {
            return Err(RegistryError::Conflict(format!("instance id {instance_id}")));
        }

        plugins.retain(|p| p.package_name() != package_name);
        plugins.push(plugin);

        info!(
            instance_id = %instance_id,
            package_name = %package_name,
            displaced,
            "[xl-05] Registered plugin"
        );
        Ok(displaced)
    }

    /// Register a typed handle.
    pub fn add_handle<T: ?Sized + Send + Sync + 'static>(
        &self,
        handle: PluginHandle<T>,
        replace_on_conflict: bool,
    ) -> Result<usize, RegistryError> {
        self.add(Arc::new(handle), replace_on_conflict)
    }

    /// Find by instance id.
    pub fn find_one_by_id(&self, instance_id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .iter()
            .find(|p| p.instance_id() == instance_id)
            .cloned()
    }

    /// Get by instance id, failing with `NotFound` when absent.
    pub fn get_one_by_id(&self, instance_id: &str) -> Result<Arc<dyn Plugin>, RegistryError> {
        self.find_one_by_id(instance_id)
            .ok_or_else(|| RegistryError::NotFound(format!("instance id {instance_id}")))
    }

    /// Find the first plugin with the given package name.
    pub fn find_one_by_package_name(&self, package_name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .iter()
            .find(|p| p.package_name() == package_name)
            .cloned()
    }

    /// Get by package name, failing with `NotFound` when absent.
    pub fn get_one_by_package_name(
        &self,
        package_name: &str,
    ) -> Result<Arc<dyn Plugin>, RegistryError> {
        self.find_one_by_package_name(package_name)
            .ok_or_else(|| RegistryError::NotFound(format!("package name {package_name}")))
    }

    /// All plugins with the given package name (empty when none).
    pub fn find_many_by_package_name(&self, package_name: &str) -> Vec<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .iter()
            .filter(|p| p.package_name() == package_name)
            .cloned()
            .collect()
    }

    /// Keychain plugin with the given keychain id.
    ///
    /// Only entries tagged [`Capability::Keychain`] are considered.
    pub fn find_one_by_keychain_id(
        &self,
        keychain_id: &str,
    ) -> Result<Arc<dyn Plugin>, RegistryError> {
        self.plugins
            .read()
            .iter()
            .filter(|p| p.capabilities().contains(Capability::Keychain))
            .find(|p| p.keychain_id() == Some(keychain_id))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(format!("keychain id {keychain_id}")))
    }

    /// Remove every plugin with the given package name, returning the count.
    pub fn delete_by_package_name(&self, package_name: &str) -> usize {
        let mut plugins = self.plugins.write();
        let before = plugins.len();
        plugins.retain(|p| p.package_name() != package_name);
        let removed = before - plugins.len();
        if removed > 0 {
            info!(package_name, removed, "[xl-05] Removed plugins");
        }
        removed
    }

    /// Snapshot of all plugins in insertion order.
    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.read().clone()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }

    // =========================================================================
    // TYPED RESOLUTION
    // =========================================================================

    /// Resolve the component behind an instance id.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        instance_id: &str,
    ) -> Result<Arc<T>, RegistryError> {
        let plugin = self.get_one_by_id(instance_id)?;
        downcast::<T>(plugin.as_ref())
    }

    /// Resolve the component behind a package name.
    pub fn resolve_by_package_name<T: ?Sized + Send + Sync + 'static>(
        &self,
        package_name: &str,
    ) -> Result<Arc<T>, RegistryError> {
        let plugin = self.get_one_by_package_name(package_name)?;
        downcast::<T>(plugin.as_ref())
    }

    /// Resolve a keychain by keychain id.
    pub fn resolve_keychain(&self, keychain_id: &str) -> Result<Arc<dyn Keychain>, RegistryError> {
        let plugin = self.find_one_by_keychain_id(keychain_id)?;
        downcast::<dyn Keychain>(plugin.as_ref())
    }
}

fn downcast<T: ?Sized + Send + Sync + 'static>(
    plugin: &dyn Plugin,
) -> Result<Arc<T>, RegistryError> {
    debug!(instance_id = plugin.instance_id(), "[xl-05] Resolving plugin");
    plugin
        .as_any()
        .downcast_ref::<PluginHandle<T>>()
        .map(PluginHandle::inner)
        .ok_or_else(|| RegistryError::TypeMismatch {
            instance_id: plugin.instance_id().to_string(),
            expected: PluginHandle::<T>::expected(),
        })
}
