//! Block Source Adapter
//!
//! In-memory chain with JSON transaction payloads, optional push
//! notifications and injectable fetch failures.

use crate::domain::{Block, MonitorError, RawTransaction, TransactionPayload};
use crate::ports::BlockSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;
use xl_05_plugin_registry::{Capability, PluginHandle};

/// Package name of the in-memory block source plugin.
pub const BLOCK_SOURCE_MEMORY_PACKAGE: &str = "block-source-memory";

/// In-memory block source.
pub struct InMemoryBlockSource {
    blocks: RwLock<Vec<Block>>,
    base_height: u64,
    streaming: AtomicBool,
    heads: broadcast::Sender<u64>,
    failures: AtomicUsize,
    fetches: AtomicUsize,
}

impl InMemoryBlockSource {
    /// Chain whose latest height is `base_height` with no stored blocks.
    pub fn new(base_height: u64) -> Self {
        let (heads, _) = broadcast::channel(256);
        Self {
            blocks: RwLock::new(Vec::new()),
            base_height,
            streaming: AtomicBool::new(false),
            heads,
            failures: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Registry handle exposing this source as `dyn BlockSource`.
    pub fn handle(self: &Arc<Self>, instance_id: impl Into<String>) -> PluginHandle<dyn BlockSource> {
        let inner: Arc<dyn BlockSource> = self.clone();
        PluginHandle::new(
            instance_id,
            BLOCK_SOURCE_MEMORY_PACKAGE,
            Capability::Connector,
            inner,
        )
    }

    /// Append a block and notify watchers when streaming.
    pub fn push_block(&self, block: Block) {
        let height = block.height;
        self.blocks.write().push(block);
        if self.streaming.load(Ordering::SeqCst) && self.heads.receiver_count() > 0 {
            let _ = self.heads.send(height);
        }
    }

    /// Append an empty block at the next height and return that height.
    pub fn push_empty_block(&self) -> u64 {
        let height = self.height() + 1;
        self.push_block(Block {
            height,
            transactions: Vec::new(),
        });
        height
    }

    /// Enable or disable push delivery.
    pub fn set_streaming(&self, enabled: bool) {
        self.streaming.store(enabled, Ordering::SeqCst);
    }

    /// Make the next `count` fetches fail.
    pub fn fail_next_fetches(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Number of fetches served, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn height(&self) -> u64 {
        self.blocks
            .read()
            .iter()
            .map(|b| b.height)
            .max()
            .unwrap_or(self.base_height)
            .max(self.base_height)
    }
}

#[async_trait]
impl BlockSource for InMemoryBlockSource {
    async fn latest_height(&self) -> Result<u64, MonitorError> {
        Ok(self.height())
    }

    async fn fetch_blocks_since(&self, height: u64) -> Result<Vec<Block>, MonitorError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let pending = self.failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.failures.store(pending - 1, Ordering::SeqCst);
            return Err(MonitorError::Source("injected fetch failure".to_string()));
        }

        let mut blocks: Vec<Block> = self
            .blocks
            .read()
            .iter()
            .filter(|b| b.height > height)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.height);
        debug!(since = height, count = blocks.len(), "[xl-04] Served blocks");
        Ok(blocks)
    }

    fn decode_transaction_payload(
        &self,
        raw: &RawTransaction,
    ) -> Result<TransactionPayload, MonitorError> {
        serde_json::from_slice(&raw.payload)
            .map_err(|e| MonitorError::MalformedPayload(format!("{}: {e}", raw.tx_id)))
    }

    fn watch_blocks(&self) -> Option<broadcast::Receiver<u64>> {
        self.streaming
            .load(Ordering::SeqCst)
            .then(|| self.heads.subscribe())
    }
}
