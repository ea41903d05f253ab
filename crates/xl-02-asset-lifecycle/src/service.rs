//! # Asset Lifecycle Service
//!
//! Implements [`AssetLifecycleApi`] over whichever connector is registered
//! under `connector_id` at call time.
//!
//! Validation (options, arguments, key format) always happens before the
//! first ledger round-trip. `lock_asset` is serialized per asset id.

use crate::domain::{
    Asset, AssetError, AssetOperation, CopyAssetRequest, CopyPayload, ForeignValidator,
    OperationAck,
};
use crate::ports::{AssetLedgerConnector, AssetLifecycleApi};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{decode_hex, encode_hex};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use xl_01_multisig::{
    eth_address, parse_compressed_public_key, Multisig, MultisigApi, MultisigEngine,
    SignatureScheme,
};
use xl_05_plugin_registry::PluginRegistry;

type AssetGuard = Arc<tokio::sync::Mutex<()>>;

/// Asset lifecycle service.
pub struct AssetLifecycleService {
    registry: Arc<PluginRegistry>,
    connector_id: String,
    scheme_override: Option<SignatureScheme>,
    lock_guards: Mutex<HashMap<String, AssetGuard>>,
}

impl AssetLifecycleService {
    /// Service addressing the connector registered as `connector_id`.
    pub fn new(registry: Arc<PluginRegistry>, connector_id: impl Into<String>) -> Self {
        Self {
            registry,
            connector_id: connector_id.into(),
            scheme_override: None,
            lock_guards: Mutex::new(HashMap::new()),
        }
    }

    /// Verify attestations with `scheme` instead of the ledger default.
    #[must_use]
    pub fn with_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.scheme_override = Some(scheme);
        self
    }

    /// Connector instance id.
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    /// Resolve the connector and re-validate its options.
    fn connector(&self) -> Result<Arc<dyn AssetLedgerConnector>, AssetError> {
        let connector = self
            .registry
            .resolve::<dyn AssetLedgerConnector>(&self.connector_id)?;
        connector.options().validate(connector.ledger_kind())?;
        Ok(connector)
    }

    fn engine_for(&self, connector: &dyn AssetLedgerConnector) -> MultisigEngine {
        let scheme = self
            .scheme_override
            .unwrap_or_else(|| SignatureScheme::for_ledger(connector.ledger_kind()));
        MultisigEngine::new(scheme)
    }

    fn asset_guard(&self, asset_id: &str) -> AssetGuard {
        self.lock_guards
            .lock()
            .entry(asset_id.to_string())
            .or_default()
            .clone()
    }

    fn release_guard(&self, asset_id: &str) {
        let mut guards = self.lock_guards.lock();
        if guards
            .get(asset_id)
            .is_some_and(|g| Arc::strong_count(g) == 1)
        {
            guards.remove(asset_id);
        }
    }
}

fn require(name: &str, value: &str) -> Result<(), AssetError> {
    if value.trim().is_empty() {
        return Err(AssetError::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

/// Canonical form used to compare public keys.
fn normalize_key(public_key: &str) -> Option<String> {
    decode_hex(public_key).ok().map(|b| encode_hex(&b))
}

#[async_trait]
impl AssetLifecycleApi for AssetLifecycleService {
    async fn create_asset(&self, asset: Asset) -> Result<Asset, AssetError> {
        let connector = self.connector()?;
        require("asset_id", &asset.asset_id)?;
        if let Some(bad) = asset.origin.iter().find(|o| !o.is_well_formed()) {
            return Err(AssetError::InvalidArgument(format!(
                "malformed origin entry: {bad:?}"
            )));
        }

        let fresh = Asset::new(asset.asset_id, asset.origin, asset.properties);
        let stored = connector.submit_asset(AssetOperation::Create(fresh)).await?;
        info!(asset_id = %stored.asset_id, "[xl-02] Asset created");
        Ok(stored)
    }

    async fn lock_asset(
        &self,
        asset_id: &str,
        target_dlt_id: &str,
        receiver_public_key: &str,
    ) -> Result<Asset, AssetError> {
        let connector = self.connector()?;
        require("asset_id", asset_id)?;
        require("target_dlt_id", target_dlt_id)?;
        require("receiver_public_key", receiver_public_key)?;

        let guard = self.asset_guard(asset_id);
        let result = {
            let _held = guard.lock().await;
            connector
                .submit_asset(AssetOperation::Lock {
                    asset_id: asset_id.to_string(),
                    target_dlt_id: target_dlt_id.to_string(),
                    receiver_public_key: receiver_public_key.to_string(),
                })
                .await
        };
        drop(guard);
        self.release_guard(asset_id);

        match &result {
            Ok(_) => info!(asset_id, target_dlt_id, "[xl-02] Asset locked"),
            Err(e) => debug!(asset_id, error = %e, "[xl-02] Lock rejected"),
        }
        result
    }

    async fn set_property(
        &self,
        asset_id: &str,
        key: &str,
        value: &str,
    ) -> Result<OperationAck, AssetError> {
        let connector = self.connector()?;
        require("asset_id", asset_id)?;
        require("key", key)?;

        connector
            .submit_asset(AssetOperation::SetProperty {
                asset_id: asset_id.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            })
            .await?;
        debug!(asset_id, key, "[xl-02] Property updated");
        Ok(OperationAck { success: true })
    }

    async fn get_asset(&self, asset_id: &str) -> Result<Asset, AssetError> {
        let connector = self.connector()?;
        require("asset_id", asset_id)?;
        connector.read_asset(asset_id).await
    }

    async fn copy_asset(&self, request: CopyAssetRequest) -> Result<Asset, AssetError> {
        let connector = self.connector()?;
        if request.msg.is_empty() {
            return Err(AssetError::MissingMessage);
        }
        let candidate = CopyPayload::parse(&request.msg)?.into_asset()?;

        let trusted: HashSet<String> = connector
            .list_validators()
            .await?
            .iter()
            .filter_map(|v| normalize_key(&v.public_key))
            .collect();

        let mut multisig = Multisig::new(request.msg.as_bytes());
        for entry in &request.signatures {
            multisig.add_signature(entry.public_key.clone(), entry.signature.clone());
        }
        let is_trusted =
            |key: &str| normalize_key(key).is_some_and(|k| trusted.contains(&k));
        let good = self
            .engine_for(connector.as_ref())
            .count_valid(&multisig, &is_trusted)?;

        if good < request.num_good {
            warn!(
                asset_id = %candidate.asset_id,
                good,
                required = request.num_good,
                "[xl-02] Copy rejected: not enough attestations"
            );
            return Err(AssetError::InsufficientSignatures {
                good,
                required: request.num_good,
            });
        }

        let stored = connector
            .submit_asset(AssetOperation::Create(candidate))
            .await?;
        info!(asset_id = %stored.asset_id, good, "[xl-02] Asset copied");
        Ok(stored)
    }

    async fn add_foreign_validator(
        &self,
        public_key: &str,
        name: &str,
    ) -> Result<ForeignValidator, AssetError> {
        let connector = self.connector()?;
        require("name", name)?;
        let key = parse_compressed_public_key(public_key)?;

        let validator = ForeignValidator {
            name: name.to_string(),
            public_key: encode_hex(key.to_encoded_point(true).as_bytes()),
            eth_address: format!("0x{}", encode_hex(&eth_address(&key))),
            ledger_type: connector.ledger_kind(),
        };
        let stored = connector.register_validator(validator).await?;
        info!(name, eth_address = %stored.eth_address, "[xl-02] Foreign validator added");
        Ok(stored)
    }

    async fn list_foreign_validators(&self) -> Result<Vec<ForeignValidator>, AssetError> {
        self.connector()?.list_validators().await
    }
}
