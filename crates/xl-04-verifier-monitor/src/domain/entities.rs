//! # Domain Entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status carried by every delivered event.
pub const EVENT_STATUS_OK: u16 = 200;

/// Raw transaction as stored in a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Transaction id.
    pub tx_id: String,
    /// Encoded payload.
    pub payload: Vec<u8>,
}

/// Ledger block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block number.
    pub height: u64,
    /// Transactions in block order.
    pub transactions: Vec<RawTransaction>,
}

/// Decoded transaction payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Transaction family (Sawtooth family name, chaincode, contract).
    pub family: String,
    /// Decoded body.
    #[serde(default)]
    pub data: Value,
}

impl TransactionPayload {
    /// Whether this payload passes `filter_key`.
    pub fn matches(&self, filter_key: &str) -> bool {
        self.family == filter_key
    }
}

/// Transaction that passed a session filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedTransaction {
    /// Containing block.
    pub block_height: u64,
    /// Transaction id.
    pub tx_id: String,
    /// Decoded payload.
    pub payload: TransactionPayload,
}

/// One delivery: every match of one cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEvent {
    /// Always [`EVENT_STATUS_OK`].
    pub status: u16,
    /// Matched transactions in block order.
    pub block_data: Vec<MatchedTransaction>,
}

impl BlockEvent {
    /// Successful event.
    pub fn ok(block_data: Vec<MatchedTransaction>) -> Self {
        Self {
            status: EVENT_STATUS_OK,
            block_data,
        }
    }
}
