//! # Inbound Ports

use crate::domain::{Asset, AssetError, CopyAssetRequest, ForeignValidator, OperationAck};
use async_trait::async_trait;

/// Asset lifecycle API - inbound port.
#[async_trait]
pub trait AssetLifecycleApi: Send + Sync {
    /// Create an asset. The stored record starts unlocked.
    async fn create_asset(&self, asset: Asset) -> Result<Asset, AssetError>;

    /// Lock an asset for transfer to `target_dlt_id`.
    async fn lock_asset(
        &self,
        asset_id: &str,
        target_dlt_id: &str,
        receiver_public_key: &str,
    ) -> Result<Asset, AssetError>;

    /// Update an existing property.
    async fn set_property(
        &self,
        asset_id: &str,
        key: &str,
        value: &str,
    ) -> Result<OperationAck, AssetError>;

    /// Read an asset.
    async fn get_asset(&self, asset_id: &str) -> Result<Asset, AssetError>;

    /// Re-create a foreign asset gated by validator attestations.
    async fn copy_asset(&self, request: CopyAssetRequest) -> Result<Asset, AssetError>;

    /// Register a foreign validator.
    async fn add_foreign_validator(
        &self,
        public_key: &str,
        name: &str,
    ) -> Result<ForeignValidator, AssetError>;

    /// Registered foreign validators.
    async fn list_foreign_validators(&self) -> Result<Vec<ForeignValidator>, AssetError>;
}
