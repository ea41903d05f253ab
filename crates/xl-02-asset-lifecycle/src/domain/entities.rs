//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::LedgerKind;
use std::collections::BTreeMap;

/// One step of an asset's provenance chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOrigin {
    /// Ledger the asset came from.
    #[serde(alias = "originDLTId", alias = "originDltId")]
    pub origin_dlt_id: String,
    /// Asset id on that ledger.
    #[serde(alias = "originAssetId")]
    pub origin_asset_id: String,
}

impl AssetOrigin {
    /// New origin entry.
    pub fn new(origin_dlt_id: impl Into<String>, origin_asset_id: impl Into<String>) -> Self {
        Self {
            origin_dlt_id: origin_dlt_id.into(),
            origin_asset_id: origin_asset_id.into(),
        }
    }

    /// Both fields are non-blank.
    pub fn is_well_formed(&self) -> bool {
        !self.origin_dlt_id.trim().is_empty() && !self.origin_asset_id.trim().is_empty()
    }
}

/// A cross-ledger asset record.
///
/// `locked` implies `target_dlt_id` and `receiver_public_key` are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Globally unique id. Immutable once created.
    pub asset_id: String,
    /// Provenance chain, oldest first.
    #[serde(default)]
    pub origin: Vec<AssetOrigin>,
    /// Property map. Fixed-shape after creation.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Whether the asset is locked for transfer.
    #[serde(default)]
    pub locked: bool,
    /// Destination ledger, set on lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dlt_id: Option<String>,
    /// Receiver on the destination ledger, set on lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_public_key: Option<String>,
}

impl Asset {
    /// New unlocked asset.
    pub fn new(
        asset_id: impl Into<String>,
        origin: Vec<AssetOrigin>,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            origin,
            properties,
            locked: false,
            target_dlt_id: None,
            receiver_public_key: None,
        }
    }

    /// Add a property (builder style, creation time only).
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Lock invariant holds.
    pub fn lock_invariant_holds(&self) -> bool {
        !self.locked
            || (self.target_dlt_id.as_deref().is_some_and(|t| !t.is_empty())
                && self
                    .receiver_public_key
                    .as_deref()
                    .is_some_and(|r| !r.is_empty()))
    }
}

/// Asset mutation submitted to a connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOperation {
    /// Create a new record.
    Create(Asset),
    /// Lock an existing record for transfer.
    Lock {
        /// Asset id.
        asset_id: String,
        /// Destination ledger.
        target_dlt_id: String,
        /// Receiver public key.
        receiver_public_key: String,
    },
    /// Update an existing property.
    SetProperty {
        /// Asset id.
        asset_id: String,
        /// Property key. Must already exist.
        key: String,
        /// New value.
        value: String,
    },
}

impl AssetOperation {
    /// Id of the asset the operation addresses.
    pub fn asset_id(&self) -> &str {
        match self {
            Self::Create(asset) => &asset.asset_id,
            Self::Lock { asset_id, .. } | Self::SetProperty { asset_id, .. } => asset_id,
        }
    }
}

/// Acknowledgement returned by `set_property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationAck {
    /// Always `true` on success.
    pub success: bool,
}

/// A public key trusted to attest to events on a foreign ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignValidator {
    /// Human label. Unique per connector.
    pub name: String,
    /// Compressed secp256k1 public key (hex).
    pub public_key: String,
    /// Ethereum-style address derived from the key (`0x` hex).
    pub eth_address: String,
    /// Ledger family of the registering connector.
    #[serde(rename = "type")]
    pub ledger_type: LedgerKind,
}
