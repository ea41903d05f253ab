//! # Verifier Session
//!
//! Pure per-client state: filter key and the last processed height. The
//! monitor task owns one instance and feeds it each cycle's blocks.

use super::entities::{Block, BlockEvent, MatchedTransaction, RawTransaction, TransactionPayload};
use super::errors::MonitorError;
use tracing::debug;
use uuid::Uuid;

/// Monitoring state of one client.
#[derive(Clone, Debug)]
pub struct VerifierSession {
    session_id: Uuid,
    client_id: String,
    filter_key: String,
    current_height: u64,
}

impl VerifierSession {
    /// Session starting after `start_height`.
    pub fn new(client_id: impl Into<String>, filter_key: impl Into<String>, start_height: u64) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            client_id: client_id.into(),
            filter_key: filter_key.into(),
            current_height: start_height,
        }
    }

    /// Session id.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Filter key.
    pub fn filter_key(&self) -> &str {
        &self.filter_key
    }

    /// Last processed block height.
    pub fn current_height(&self) -> u64 {
        self.current_height
    }

    /// Process one cycle's blocks.
    ///
    /// Blocks at or below the current height are ignored. The height moves to
    /// the highest block seen even when nothing matched, and never goes back.
    /// Returns one event with every match, or `None` when nothing matched.
    pub fn process<D>(&mut self, blocks: &[Block], decode: D) -> Option<BlockEvent>
    where
        D: Fn(&RawTransaction) -> Result<TransactionPayload, MonitorError>,
    {
        let mut fresh: Vec<&Block> = blocks
            .iter()
            .filter(|b| b.height > self.current_height)
            .collect();
        fresh.sort_by_key(|b| b.height);

        let mut matched = Vec::new();
        for block in &fresh {
            for tx in &block.transactions {
                match decode(tx) {
                    Ok(payload) if payload.matches(&self.filter_key) => {
                        matched.push(MatchedTransaction {
                            block_height: block.height,
                            tx_id: tx.tx_id.clone(),
                            payload,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(
                            client_id = %self.client_id,
                            tx_id = %tx.tx_id,
                            error = %e,
                            "[xl-04] Skipping undecodable transaction"
                        );
                    }
                }
            }
        }

        if let Some(last) = fresh.last() {
            self.current_height = self.current_height.max(last.height);
        }

        (!matched.is_empty()).then(|| BlockEvent::ok(matched))
    }
}
