//! # Plugins
//!
//! A plugin is anything the registry can hold. Components are usually
//! registered through a [`PluginHandle`], which pairs registry metadata with
//! an `Arc` of the component's trait object so callers can get it back typed.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Capability tag of a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Ledger connector (asset store, HTLC contracts, block source).
    Connector,
    /// Credential storage.
    Keychain,
    /// Ledger event verifier / monitor.
    Verifier,
    /// Business-logic plugin or HTLC package strategy.
    BusinessLogic,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Self::Connector => 1,
            Self::Keychain => 1 << 1,
            Self::Verifier => 1 << 2,
            Self::BusinessLogic => 1 << 3,
        }
    }
}

/// Set of capability tags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// Empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Set holding a single capability.
    #[must_use]
    pub const fn only(capability: Capability) -> Self {
        Self(capability.bit())
    }

    /// Add a capability.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether no tag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<Capability> for Capabilities {
    fn from(capability: Capability) -> Self {
        Self::only(capability)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all = [
            Capability::Connector,
            Capability::Keychain,
            Capability::Verifier,
            Capability::BusinessLogic,
        ];
        f.debug_set()
            .entries(all.iter().filter(|c| self.contains(**c)))
            .finish()
    }
}

/// Anything that can be registered.
pub trait Plugin: Send + Sync + 'static {
    /// Unique key in the registry.
    fn instance_id(&self) -> &str;

    /// Package name. Unique unless the caller opts into replacement.
    fn package_name(&self) -> &str;

    /// Capability tags.
    fn capabilities(&self) -> Capabilities;

    /// Keychain id, for plugins tagged [`Capability::Keychain`].
    fn keychain_id(&self) -> Option<&str> {
        None
    }

    /// Downcasting hook used by typed lookups.
    fn as_any(&self) -> &dyn Any;
}

/// Registry entry wrapping a shared component.
///
/// `T` is usually a trait object such as `dyn Keychain`, which lets one
/// implementation be swapped for another without the caller noticing.
pub struct PluginHandle<T: ?Sized> {
    instance_id: String,
    package_name: String,
    capabilities: Capabilities,
    keychain_id: Option<String>,
    inner: Arc<T>,
}

impl<T: ?Sized + Send + Sync + 'static> PluginHandle<T> {
    /// Wrap a component.
    pub fn new(
        instance_id: impl Into<String>,
        package_name: impl Into<String>,
        capabilities: impl Into<Capabilities>,
        inner: Arc<T>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            package_name: package_name.into(),
            capabilities: capabilities.into(),
            keychain_id: None,
            inner,
        }
    }

    /// Tag the handle as a keychain with the given keychain id.
    #[must_use]
    pub fn with_keychain_id(mut self, keychain_id: impl Into<String>) -> Self {
        self.capabilities = self.capabilities.with(Capability::Keychain);
        self.keychain_id = Some(keychain_id.into());
        self
    }

    /// The wrapped component.
    #[must_use]
    pub fn inner(&self) -> Arc<T> {
        Arc::clone(&self.inner)
    }

    pub(crate) fn expected() -> &'static str {
        type_name::<T>()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Plugin for PluginHandle<T> {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn keychain_id(&self) -> Option<&str> {
        self.keychain_id.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: ?Sized> fmt::Debug for PluginHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHandle")
            .field("instance_id", &self.instance_id)
            .field("package_name", &self.package_name)
            .field("capabilities", &self.capabilities)
            .field("keychain_id", &self.keychain_id)
            .finish()
    }
}
