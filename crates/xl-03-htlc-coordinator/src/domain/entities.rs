//! # Domain Entities
//!
//! Requests, receipts and credentials exchanged with the coordinator.

use super::secure_secret::SecureSecret;
use super::value_objects::HtlcLegState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Hash;
use zeroize::Zeroizing;

/// How a ledger transaction is signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SigningCredential {
    /// Raw private key supplied with the request.
    PrivateKeyHex {
        /// Sending account.
        eth_account: String,
        /// Hex private key.
        secret: String,
    },
    /// Private key held in a registered keychain.
    KeychainRef {
        /// Sending account.
        eth_account: String,
        /// Keychain id to resolve through the registry.
        keychain_id: String,
        /// Entry key inside the keychain.
        key_name: String,
    },
    /// No signing (read-only calls, node-managed accounts).
    None,
}

/// Credential after keychain resolution.
#[derive(Clone, Default)]
pub struct ResolvedCredential {
    /// Sending account.
    pub eth_account: Option<String>,
    /// Private key, zeroized on drop.
    pub private_key: Option<Zeroizing<String>>,
}

impl ResolvedCredential {
    /// Whether a private key is available.
    pub fn can_sign(&self) -> bool {
        self.private_key.is_some()
    }
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("eth_account", &self.eth_account)
            .field("private_key", &self.private_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Swap terms written into a new HTLC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcTerms {
    /// Amount locked on this ledger.
    pub input_amount: u64,
    /// Amount expected on the counterpart ledger.
    pub output_amount: u64,
    /// Unix time after which the HTLC can no longer be withdrawn.
    pub expiration: u64,
    /// SHA-256 of the pre-image.
    pub hash_lock: Hash,
    /// Receiver account on this ledger.
    pub receiver: String,
    /// Counterpart network.
    pub output_network: String,
    /// Counterpart address.
    pub output_address: String,
    /// ERC-20 token contract (`BesuErc20` only).
    pub token_address: Option<String>,
}

/// Request to open our own leg of a swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnHtlcRequest {
    /// Package kind as received (`Besu`, `BesuErc20`).
    pub htlc_package: String,
    /// Ledger connector instance id.
    pub connector_instance_id: String,
    /// Logic contract constructor arguments.
    #[serde(default)]
    pub constructor_args: Vec<Value>,
    /// Signing credential.
    pub signing_credential: SigningCredential,
    /// Amount locked on this ledger.
    pub input_amount: u64,
    /// Amount expected on the counterpart ledger.
    pub output_amount: u64,
    /// Unix expiration.
    pub expiration: u64,
    /// Hex SHA-256 hash lock.
    pub hash_lock: String,
    /// ERC-20 token contract.
    #[serde(default)]
    pub token_address: Option<String>,
    /// Receiver account.
    pub receiver: String,
    /// Counterpart network.
    pub output_network: String,
    /// Counterpart address.
    pub output_address: String,
    /// Gas limit.
    #[serde(default)]
    pub gas: Option<u64>,
}

/// Request for the status of the counterparty's HTLC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartyHtlcRequest {
    /// Package kind as received.
    pub htlc_package: String,
    /// Ledger connector instance id.
    pub connector_instance_id: String,
    /// HTLC id.
    pub htlc_id: String,
    /// Signing credential.
    pub signing_credential: SigningCredential,
}

/// Request to withdraw the counterparty's HTLC with the pre-image.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawCounterpartyRequest {
    /// Package kind as received.
    pub htlc_package: String,
    /// Ledger connector instance id.
    pub connector_instance_id: String,
    /// HTLC id.
    pub htlc_id: String,
    /// Pre-image.
    pub secret: SecureSecret,
    /// Signing credential.
    pub signing_credential: SigningCredential,
}

/// Ledger transaction receipt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Whether the transaction succeeded.
    pub status: bool,
    /// Transaction hash.
    pub transaction_hash: String,
    /// Deployed contract address (deployments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// Created HTLC id (`new_contract` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub htlc_id: Option<String>,
}

/// Result of opening our own leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnHtlcResponse {
    /// Logic contract address.
    pub contract_address: String,
    /// Receipt of the `new_contract` transaction.
    pub receipt: TransactionReceipt,
    /// Leg state after the call.
    pub state: HtlcLegState,
}

/// On-chain status of an HTLC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtlcStatus {
    /// HTLC id.
    pub htlc_id: String,
    /// Raw status code.
    pub status_code: u8,
    /// Leg state, `None` for an invalid code.
    pub state: Option<HtlcLegState>,
}
