//! Asset Ledger Adapter
//!
//! Implements `AssetLedgerConnector` over in-memory maps, enforcing the same
//! rules as the on-chain asset contract.

use crate::domain::{Asset, AssetError, AssetOperation, ConnectorOptions, ForeignValidator};
use crate::ports::AssetLedgerConnector;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use shared_types::LedgerKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;
use xl_05_plugin_registry::{Capability, PluginHandle};

/// Package name of the in-memory asset ledger plugin.
pub const ASSET_LEDGER_MEMORY_PACKAGE: &str = "asset-ledger-memory";

/// In-memory asset ledger.
pub struct InMemoryAssetLedger {
    ledger: LedgerKind,
    options: RwLock<ConnectorOptions>,
    assets: RwLock<HashMap<String, Asset>>,
    validators: RwLock<Vec<ForeignValidator>>,
    calls: AtomicUsize,
}

impl InMemoryAssetLedger {
    /// Empty ledger with the given options.
    pub fn new(ledger: LedgerKind, options: ConnectorOptions) -> Self {
        Self {
            ledger,
            options: RwLock::new(options),
            assets: RwLock::new(HashMap::new()),
            validators: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Registry handle exposing this ledger as `dyn AssetLedgerConnector`.
    pub fn handle(
        self: &Arc<Self>,
        instance_id: impl Into<String>,
        package_name: impl Into<String>,
    ) -> PluginHandle<dyn AssetLedgerConnector> {
        let inner: Arc<dyn AssetLedgerConnector> = self.clone();
        PluginHandle::new(instance_id, package_name, Capability::Connector, inner)
    }

    /// Mutate one raw option at runtime.
    pub fn set_option(&self, key: &str, value: Value) {
        self.options.write().set(key, value);
    }

    /// Number of ledger calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored assets.
    pub fn asset_count(&self) -> usize {
        self.assets.read().len()
    }

    fn count_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetLedgerConnector for InMemoryAssetLedger {
    fn ledger_kind(&self) -> LedgerKind {
        self.ledger
    }

    fn options(&self) -> ConnectorOptions {
        self.options.read().clone()
    }

    async fn submit_asset(&self, operation: AssetOperation) -> Result<Asset, AssetError> {
        self.count_call();
        debug!(asset_id = operation.asset_id(), "[xl-02] Ledger submit");

        let mut assets = self.assets.write();
        match operation {
            AssetOperation::Create(asset) => {
                if assets.contains_key(&asset.asset_id) {
                    return Err(AssetError::Conflict(asset.asset_id));
                }
                assets.insert(asset.asset_id.clone(), asset.clone());
                Ok(asset)
            }
            AssetOperation::Lock {
                asset_id,
                target_dlt_id,
                receiver_public_key,
            } => {
                let asset = assets
                    .get_mut(&asset_id)
                    .ok_or_else(|| AssetError::NotFound(asset_id.clone()))?;
                if asset.locked {
                    return Err(AssetError::AlreadyLocked(asset_id));
                }
                asset.locked = true;
                asset.target_dlt_id = Some(target_dlt_id);
                asset.receiver_public_key = Some(receiver_public_key);
                Ok(asset.clone())
            }
            AssetOperation::SetProperty {
                asset_id,
                key,
                value,
            } => {
                let asset = assets
                    .get_mut(&asset_id)
                    .ok_or_else(|| AssetError::NotFound(asset_id.clone()))?;
                let slot = asset
                    .properties
                    .get_mut(&key)
                    .ok_or_else(|| AssetError::NotFound(format!("property {key} of {asset_id}")))?;
                *slot = value;
                Ok(asset.clone())
            }
        }
    }

    async fn read_asset(&self, asset_id: &str) -> Result<Asset, AssetError> {
        self.count_call();
        self.assets
            .read()
            .get(asset_id)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(asset_id.to_string()))
    }

    async fn list_validators(&self) -> Result<Vec<ForeignValidator>, AssetError> {
        self.count_call();
        Ok(self.validators.read().clone())
    }

    async fn register_validator(
        &self,
        validator: ForeignValidator,
    ) -> Result<ForeignValidator, AssetError> {
        self.count_call();
        let mut validators = self.validators.write();
        if validators.iter().any(|v| v.name == validator.name) {
            return Err(AssetError::Conflict(format!("validator {}", validator.name)));
        }
        validators.push(validator.clone());
        Ok(validator)
    }
}
