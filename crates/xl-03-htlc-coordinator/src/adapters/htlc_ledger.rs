//! HTLC Ledger Adapter
//!
//! Implements `HtlcLedgerConnector` in memory with the rules of the on-chain
//! HTLC contracts: hash lock, expiration and one-way status.

use crate::algorithms::verify_secret;
use crate::domain::{
    status_code, HtlcError, HtlcPackage, HtlcTerms, ResolvedCredential, SecureSecret,
    TransactionReceipt,
};
use crate::ports::HtlcLedgerConnector;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use xl_05_plugin_registry::{Capability, PluginHandle};

/// Package name of the in-memory HTLC ledger plugin.
pub const HTLC_LEDGER_MEMORY_PACKAGE: &str = "htlc-ledger-memory";

#[derive(Clone, Debug)]
struct HtlcRecord {
    terms: HtlcTerms,
    status: u8,
}

/// In-memory EVM ledger hosting HTLC contracts.
pub struct InMemoryHtlcLedger {
    contracts: RwLock<HashMap<String, HtlcPackage>>,
    htlcs: RwLock<HashMap<String, HtlcRecord>>,
    current_time: RwLock<u64>,
    fail_initialization: AtomicBool,
    nonce: AtomicU64,
    calls: AtomicUsize,
}

impl InMemoryHtlcLedger {
    /// Empty ledger with the clock at `1_700_000_000`.
    pub fn new() -> Self {
        Self {
            contracts: RwLock::new(HashMap::new()),
            htlcs: RwLock::new(HashMap::new()),
            current_time: RwLock::new(1_700_000_000),
            fail_initialization: AtomicBool::new(false),
            nonce: AtomicU64::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Registry handle exposing this ledger as `dyn HtlcLedgerConnector`.
    pub fn handle(self: &Arc<Self>, instance_id: impl Into<String>) -> PluginHandle<dyn HtlcLedgerConnector> {
        let inner: Arc<dyn HtlcLedgerConnector> = self.clone();
        PluginHandle::new(
            instance_id,
            HTLC_LEDGER_MEMORY_PACKAGE,
            Capability::Connector,
            inner,
        )
    }

    /// Set current time for testing.
    pub fn set_time(&self, time: u64) {
        *self.current_time.write() = time;
    }

    /// Advance time for testing.
    pub fn advance_time(&self, secs: u64) {
        *self.current_time.write() += secs;
    }

    /// Current ledger time.
    pub fn now(&self) -> u64 {
        *self.current_time.read()
    }

    /// Make logic contract deployments revert.
    pub fn set_fail_initialization(&self, fail: bool) {
        self.fail_initialization.store(fail, Ordering::SeqCst);
    }

    /// Number of ledger calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of HTLCs created.
    pub fn htlc_count(&self) -> usize {
        self.htlcs.read().len()
    }

    fn count_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn next_tx_hash(&self, tag: &[u8]) -> String {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_le_bytes());
        hasher.update(tag);
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

impl Default for InMemoryHtlcLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn sender(credential: &ResolvedCredential) -> Result<&str, HtlcError> {
    credential
        .eth_account
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| HtlcError::Connector("transaction has no sender account".to_string()))
}

/// HTLC id from the creating transaction's terms.
fn generate_htlc_id(contract_address: &str, sender: &str, terms: &HtlcTerms) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contract_address.as_bytes());
    hasher.update(sender.as_bytes());
    hasher.update(terms.receiver.as_bytes());
    hasher.update(terms.input_amount.to_le_bytes());
    hasher.update(terms.expiration.to_le_bytes());
    hasher.update(terms.hash_lock);
    hex::encode(hasher.finalize())
}

#[async_trait]
impl HtlcLedgerConnector for InMemoryHtlcLedger {
    async fn initialize_htlc(
        &self,
        package: HtlcPackage,
        constructor_args: &[Value],
        credential: &ResolvedCredential,
        _gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError> {
        self.count_call();
        let from = sender(credential)?;
        let transaction_hash = self.next_tx_hash(package.package_name().as_bytes());

        if self.fail_initialization.load(Ordering::SeqCst) {
            debug!(package = %package, "[xl-03] Logic contract deployment reverted");
            return Ok(TransactionReceipt {
                status: false,
                transaction_hash,
                ..TransactionReceipt::default()
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(from.as_bytes());
        hasher.update(transaction_hash.as_bytes());
        hasher.update(Value::Array(constructor_args.to_vec()).to_string().as_bytes());
        let digest = hasher.finalize();
        let address = format!("0x{}", hex::encode(&digest[..20]));

        self.contracts.write().insert(address.clone(), package);
        info!(package = %package, contract = %address, "[xl-03] Logic contract deployed");
        Ok(TransactionReceipt {
            status: true,
            transaction_hash,
            contract_address: Some(address),
            htlc_id: None,
        })
    }

    async fn create_htlc_contract(
        &self,
        contract_address: &str,
        terms: &HtlcTerms,
        credential: &ResolvedCredential,
        _gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError> {
        self.count_call();
        let from = sender(credential)?;
        let package = *self
            .contracts
            .read()
            .get(contract_address)
            .ok_or_else(|| HtlcError::NotFound(format!("contract {contract_address}")))?;

        if terms.expiration <= self.now() {
            return Err(HtlcError::Expired(format!(
                "expiration {} is not in the future",
                terms.expiration
            )));
        }
        if package == HtlcPackage::BesuErc20 && terms.token_address.is_none() {
            return Err(HtlcError::InvalidArgument(
                "token contract required".to_string(),
            ));
        }

        let htlc_id = generate_htlc_id(contract_address, from, terms);
        {
            let mut htlcs = self.htlcs.write();
            if htlcs.contains_key(&htlc_id) {
                return Err(HtlcError::Conflict(htlc_id));
            }
            htlcs.insert(
                htlc_id.clone(),
                HtlcRecord {
                    terms: terms.clone(),
                    status: status_code::ACTIVE,
                },
            );
        }

        info!(htlc_id = %htlc_id, contract = contract_address, "[xl-03] HTLC funded");
        Ok(TransactionReceipt {
            status: true,
            transaction_hash: self.next_tx_hash(htlc_id.as_bytes()),
            contract_address: None,
            htlc_id: Some(htlc_id),
        })
    }

    async fn htlc_status(&self, htlc_id: &str) -> Result<u8, HtlcError> {
        self.count_call();
        let now = self.now();
        let status = match self.htlcs.read().get(htlc_id) {
            None => status_code::INVALID,
            Some(record) if record.status == status_code::ACTIVE && now > record.terms.expiration => {
                status_code::EXPIRED
            }
            Some(record) => record.status,
        };
        Ok(status)
    }

    async fn withdraw_htlc(
        &self,
        htlc_id: &str,
        secret: &SecureSecret,
        credential: &ResolvedCredential,
    ) -> Result<TransactionReceipt, HtlcError> {
        self.count_call();
        sender(credential)?;
        let now = self.now();
        {
            let mut htlcs = self.htlcs.write();
            let record = htlcs
                .get_mut(htlc_id)
                .ok_or_else(|| HtlcError::NotFound(format!("htlc {htlc_id}")))?;

            if record.status != status_code::ACTIVE {
                return Err(HtlcError::InvalidTransition {
                    from: format!("status {}", record.status),
                    to: "withdrawn".to_string(),
                });
            }
            if now > record.terms.expiration {
                return Err(HtlcError::Expired(htlc_id.to_string()));
            }
            if !verify_secret(secret, &record.terms.hash_lock) {
                return Err(HtlcError::InvalidSecret);
            }
            record.status = status_code::WITHDRAWN;
        }

        info!(htlc_id, "[xl-03] HTLC withdrawn");
        Ok(TransactionReceipt {
            status: true,
            transaction_hash: self.next_tx_hash(htlc_id.as_bytes()),
            contract_address: None,
            htlc_id: Some(htlc_id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::create_hash_lock;

    fn alice() -> ResolvedCredential {
        ResolvedCredential {
            eth_account: Some("0xalice".to_string()),
            private_key: None,
        }
    }

    fn terms(secret: &SecureSecret) -> HtlcTerms {
        HtlcTerms {
            input_amount: 1000,
            output_amount: 1,
            expiration: 1_700_100_000,
            hash_lock: create_hash_lock(secret),
            receiver: "0xbob".to_string(),
            output_network: "fabric".to_string(),
            output_address: "bob".to_string(),
            token_address: None,
        }
    }

    async fn funded(ledger: &InMemoryHtlcLedger, secret: &SecureSecret) -> String {
        let receipt = ledger
            .initialize_htlc(HtlcPackage::Besu, &[], &alice(), None)
            .await
            .unwrap();
        let address = receipt.contract_address.unwrap();
        ledger
            .create_htlc_contract(&address, &terms(secret), &alice(), None)
            .await
            .unwrap()
            .htlc_id
            .unwrap()
    }

    #[tokio::test]
    async fn test_withdraw_with_valid_secret() {
        let ledger = InMemoryHtlcLedger::new();
        let secret = SecureSecret::new([1u8; 32]);
        let id = funded(&ledger, &secret).await;

        assert_eq!(ledger.htlc_status(&id).await.unwrap(), status_code::ACTIVE);
        let receipt = ledger.withdraw_htlc(&id, &secret, &alice()).await.unwrap();
        assert!(receipt.status);
        assert_eq!(ledger.htlc_status(&id).await.unwrap(), status_code::WITHDRAWN);
    }

    #[tokio::test]
    async fn test_withdraw_with_invalid_secret_fails() {
        let ledger = InMemoryHtlcLedger::new();
        let id = funded(&ledger, &SecureSecret::new([1u8; 32])).await;

        let result = ledger
            .withdraw_htlc(&id, &SecureSecret::new([99u8; 32]), &alice())
            .await;
        assert!(matches!(result, Err(HtlcError::InvalidSecret)));
    }

    #[tokio::test]
    async fn test_withdraw_after_expiry_fails() {
        let ledger = InMemoryHtlcLedger::new();
        let secret = SecureSecret::new([1u8; 32]);
        let id = funded(&ledger, &secret).await;

        ledger.advance_time(100_000);
        assert_eq!(ledger.htlc_status(&id).await.unwrap(), status_code::ACTIVE);
        ledger.set_time(1_700_200_000);
        assert_eq!(ledger.htlc_status(&id).await.unwrap(), status_code::EXPIRED);
        let result = ledger.withdraw_htlc(&id, &secret, &alice()).await;
        assert!(matches!(result, Err(HtlcError::Expired(_))));
    }

    #[tokio::test]
    async fn test_double_withdraw_is_invalid_transition() {
        let ledger = InMemoryHtlcLedger::new();
        let secret = SecureSecret::new([1u8; 32]);
        let id = funded(&ledger, &secret).await;

        ledger.withdraw_htlc(&id, &secret, &alice()).await.unwrap();
        let result = ledger.withdraw_htlc(&id, &secret, &alice()).await;
        assert!(matches!(result, Err(HtlcError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_unknown_htlc_status_is_invalid() {
        let ledger = InMemoryHtlcLedger::new();
        assert_eq!(ledger.htlc_status("missing").await.unwrap(), status_code::INVALID);
    }

    #[tokio::test]
    async fn test_failed_initialization_has_no_address() {
        let ledger = InMemoryHtlcLedger::new();
        ledger.set_fail_initialization(true);
        let receipt = ledger
            .initialize_htlc(HtlcPackage::Besu, &[], &alice(), None)
            .await
            .unwrap();
        assert!(!receipt.status);
        assert!(receipt.contract_address.is_none());
    }

    #[tokio::test]
    async fn test_past_expiration_rejected() {
        let ledger = InMemoryHtlcLedger::new();
        let secret = SecureSecret::new([1u8; 32]);
        let address = ledger
            .initialize_htlc(HtlcPackage::Besu, &[], &alice(), None)
            .await
            .unwrap()
            .contract_address
            .unwrap();
        let mut stale = terms(&secret);
        stale.expiration = ledger.now();
        let result = ledger
            .create_htlc_contract(&address, &stale, &alice(), None)
            .await;
        assert!(matches!(result, Err(HtlcError::Expired(_))));
    }

    #[tokio::test]
    async fn test_mutation_requires_sender() {
        let ledger = InMemoryHtlcLedger::new();
        let result = ledger
            .initialize_htlc(HtlcPackage::Besu, &[], &ResolvedCredential::default(), None)
            .await;
        assert!(matches!(result, Err(HtlcError::Connector(_))));
        assert_eq!(ledger.call_count(), 1);
    }
}
