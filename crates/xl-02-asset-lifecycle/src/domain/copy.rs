//! # Copy Payload
//!
//! `copy_asset` receives the source ledger's serialized record and the
//! attestations over those exact bytes. Two wire shapes exist in the wild:
//! properties nested under `properties`, or flattened beside the known
//! fields. Both are accepted.

use super::entities::{Asset, AssetOrigin};
use super::errors::AssetError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use xl_01_multisig::SignatureEntry;

/// Copy request: threshold, message and attestations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyAssetRequest {
    /// Minimum number of valid attestations from registered validators.
    pub num_good: usize,
    /// Serialized source record; attestations sign these bytes.
    pub msg: String,
    /// Attestations, in order.
    pub signatures: Vec<SignatureEntry>,
}

/// Serialized asset record as signed on the source ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyPayload {
    /// Asset id.
    #[serde(alias = "assetId")]
    pub asset_id: String,
    /// Ledger the record was exported from.
    #[serde(rename = "dltID", default, skip_serializing_if = "Option::is_none")]
    pub dlt_id: Option<String>,
    /// Provenance chain on the source ledger.
    #[serde(default)]
    pub origin: Vec<AssetOrigin>,
    /// Nested properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Lock flag on the source ledger.
    #[serde(default)]
    pub locked: bool,
    /// Destination ledger from the source lock.
    #[serde(rename = "targetDltId", default, skip_serializing_if = "Option::is_none")]
    pub target_dlt_id: Option<String>,
    /// Receiver from the source lock.
    #[serde(rename = "receiverPK", default, skip_serializing_if = "Option::is_none")]
    pub receiver_pk: Option<String>,
    /// Flattened properties.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CopyPayload {
    /// Payload describing `asset` as exported from `dlt_id`.
    pub fn from_asset(asset: &Asset, dlt_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            dlt_id: Some(dlt_id.into()),
            origin: asset.origin.clone(),
            properties: asset.properties.clone(),
            locked: asset.locked,
            target_dlt_id: asset.target_dlt_id.clone(),
            receiver_pk: asset.receiver_public_key.clone(),
            extra: BTreeMap::new(),
        }
    }

    /// Parse a copy message.
    pub fn parse(msg: &str) -> Result<Self, AssetError> {
        serde_json::from_str(msg).map_err(|e| AssetError::MalformedRecord(e.to_string()))
    }

    /// Serialize to the message attestations sign.
    pub fn to_message(&self) -> Result<String, AssetError> {
        serde_json::to_string(self).map_err(|e| AssetError::MalformedRecord(e.to_string()))
    }

    /// Record to create on the destination ledger.
    ///
    /// The copy starts unlocked. When the source ledger is named it is
    /// appended to the provenance chain.
    pub fn into_asset(self) -> Result<Asset, AssetError> {
        if self.asset_id.trim().is_empty() {
            return Err(AssetError::MalformedRecord("asset_id is blank".to_string()));
        }
        if let Some(bad) = self.origin.iter().find(|o| !o.is_well_formed()) {
            return Err(AssetError::MalformedRecord(format!(
                "malformed origin entry: {bad:?}"
            )));
        }

        let mut properties = self.properties;
        for (key, value) in self.extra {
            if let Value::String(s) = value {
                properties.entry(key).or_insert(s);
            }
        }

        let mut origin = self.origin;
        if let Some(dlt_id) = self.dlt_id.filter(|d| !d.trim().is_empty()) {
            origin.push(AssetOrigin::new(dlt_id, self.asset_id.clone()));
        }

        Ok(Asset::new(self.asset_id, origin, properties))
    }
}
