//! # Outbound Ports (SPI)

use crate::domain::{Block, BlockEvent, MonitorError, RawTransaction, TransactionPayload};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Block reading primitives of a ledger connector.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Current chain height.
    async fn latest_height(&self) -> Result<u64, MonitorError>;

    /// Blocks with height strictly above `height`, ascending.
    async fn fetch_blocks_since(&self, height: u64) -> Result<Vec<Block>, MonitorError>;

    /// Decode one transaction's payload.
    fn decode_transaction_payload(
        &self,
        raw: &RawTransaction,
    ) -> Result<TransactionPayload, MonitorError>;

    /// New-head notifications, for sources with push delivery.
    ///
    /// Sessions still poll at their interval; a notification only triggers
    /// an early cycle.
    fn watch_blocks(&self) -> Option<broadcast::Receiver<u64>> {
        None
    }
}

/// Business logic fed by a monitoring session.
#[async_trait]
pub trait BusinessLogicPlugin: Send + Sync {
    /// Handle one batched event of `client_id`.
    async fn on_event(&self, client_id: &str, event: BlockEvent) -> Result<(), MonitorError>;
}
