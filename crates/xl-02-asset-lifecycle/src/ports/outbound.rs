//! # Outbound Ports
//!
//! The ledger connector owns the asset store and the validator list; the
//! protocol only mediates reads and writes through it.

use crate::domain::{Asset, AssetError, AssetOperation, ConnectorOptions, ForeignValidator};
use async_trait::async_trait;
use shared_types::LedgerKind;

/// Asset ledger connector - outbound port.
///
/// Business rules (`NotFound`, `Conflict`, `AlreadyLocked`) are enforced by
/// the ledger itself and reported back through these results.
#[async_trait]
pub trait AssetLedgerConnector: Send + Sync {
    /// Ledger family behind this connector.
    fn ledger_kind(&self) -> LedgerKind;

    /// Current raw options. May change between calls.
    fn options(&self) -> ConnectorOptions;

    /// Apply a mutation and return the resulting record.
    async fn submit_asset(&self, operation: AssetOperation) -> Result<Asset, AssetError>;

    /// Read a record.
    async fn read_asset(&self, asset_id: &str) -> Result<Asset, AssetError>;

    /// Registered foreign validators.
    async fn list_validators(&self) -> Result<Vec<ForeignValidator>, AssetError>;

    /// Register a foreign validator.
    async fn register_validator(
        &self,
        validator: ForeignValidator,
    ) -> Result<ForeignValidator, AssetError>;
}
