//! # HTLC Coordinator Service
//!
//! Implements [`HtlcCoordinatorApi`]. The package string is parsed before
//! anything else, so an unknown package never reaches a ledger.

use crate::domain::{
    CounterpartyHtlcRequest, HtlcError, HtlcLegState, HtlcPackage, HtlcStatus, HtlcTerms,
    OwnHtlcRequest, OwnHtlcResponse, ResolvedCredential, SigningCredential, TransactionReceipt,
    WithdrawCounterpartyRequest,
};
use crate::ports::{HtlcCoordinatorApi, HtlcPackageStrategy};
use async_trait::async_trait;
use shared_types::{decode_hex, Hash};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use xl_05_plugin_registry::PluginRegistry;
use zeroize::Zeroizing;

/// HTLC coordinator.
pub struct HtlcCoordinator {
    registry: Arc<PluginRegistry>,
}

impl HtlcCoordinator {
    /// Coordinator resolving strategies and connectors from `registry`.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Strategy registered for `package`, looked up on every call.
    fn strategy(&self, package: HtlcPackage) -> Result<Arc<dyn HtlcPackageStrategy>, HtlcError> {
        Ok(self
            .registry
            .resolve_by_package_name::<dyn HtlcPackageStrategy>(package.package_name())?)
    }

    async fn resolve_credential(
        &self,
        credential: &SigningCredential,
    ) -> Result<ResolvedCredential, HtlcError> {
        match credential {
            SigningCredential::PrivateKeyHex {
                eth_account,
                secret,
            } => Ok(ResolvedCredential {
                eth_account: Some(eth_account.clone()),
                private_key: Some(Zeroizing::new(secret.clone())),
            }),
            SigningCredential::KeychainRef {
                eth_account,
                keychain_id,
                key_name,
            } => {
                let keychain = self.registry.resolve_keychain(keychain_id)?;
                let key = keychain.get(key_name).await?.ok_or_else(|| {
                    HtlcError::NotFound(format!("key {key_name} in keychain {keychain_id}"))
                })?;
                Ok(ResolvedCredential {
                    eth_account: Some(eth_account.clone()),
                    private_key: Some(Zeroizing::new(key)),
                })
            }
            SigningCredential::None => Ok(ResolvedCredential::default()),
        }
    }
}

fn require(name: &str, value: &str) -> Result<(), HtlcError> {
    if value.trim().is_empty() {
        return Err(HtlcError::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

fn parse_hash_lock(hash_lock: &str) -> Result<Hash, HtlcError> {
    decode_hex(hash_lock)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            HtlcError::InvalidArgument(format!("hash_lock must be 32 hex bytes: {hash_lock}"))
        })
}

#[async_trait]
impl HtlcCoordinatorApi for HtlcCoordinator {
    async fn own_htlc(&self, request: OwnHtlcRequest) -> Result<OwnHtlcResponse, HtlcError> {
        let package: HtlcPackage = request.htlc_package.parse()?;
        let request_id = Uuid::new_v4();
        require("connector_instance_id", &request.connector_instance_id)?;
        require("receiver", &request.receiver)?;

        let terms = HtlcTerms {
            input_amount: request.input_amount,
            output_amount: request.output_amount,
            expiration: request.expiration,
            hash_lock: parse_hash_lock(&request.hash_lock)?,
            receiver: request.receiver.clone(),
            output_network: request.output_network.clone(),
            output_address: request.output_address.clone(),
            token_address: request.token_address.clone(),
        };
        let strategy = self.strategy(package)?;
        strategy.validate_terms(&terms)?;
        let credential = self.resolve_credential(&request.signing_credential).await?;

        let mut state = HtlcLegState::Uninitialized;
        debug!(%request_id, package = %package, "[xl-03] Initializing own HTLC");
        let init = strategy
            .initialize(
                &self.registry,
                &request.connector_instance_id,
                &request.constructor_args,
                &credential,
                request.gas,
            )
            .await?;

        let contract_address = match init.contract_address {
            Some(address) if init.status && !address.is_empty() => address,
            _ => {
                warn!(
                    %request_id,
                    transaction_hash = %init.transaction_hash,
                    "[xl-03] Logic contract initialization failed"
                );
                return Err(HtlcError::InitializationFailed(format!(
                    "receipt status {} without contract address (tx {})",
                    init.status, init.transaction_hash
                )));
            }
        };
        state = state.advance(HtlcLegState::Initialized)?;

        let receipt = strategy
            .new_contract(
                &self.registry,
                &request.connector_instance_id,
                &contract_address,
                &terms,
                &credential,
                request.gas,
            )
            .await?;
        if !receipt.status {
            return Err(HtlcError::Connector(format!(
                "newContract reverted (tx {})",
                receipt.transaction_hash
            )));
        }
        state = state.advance(HtlcLegState::Funded)?;

        info!(
            %request_id,
            package = %package,
            contract = %contract_address,
            htlc_id = ?receipt.htlc_id,
            "[xl-03] Own HTLC funded"
        );
        Ok(OwnHtlcResponse {
            contract_address,
            receipt,
            state,
        })
    }

    async fn counterparty_htlc(
        &self,
        request: CounterpartyHtlcRequest,
    ) -> Result<HtlcStatus, HtlcError> {
        let package: HtlcPackage = request.htlc_package.parse()?;
        require("connector_instance_id", &request.connector_instance_id)?;
        require("htlc_id", &request.htlc_id)?;

        let strategy = self.strategy(package)?;
        self.resolve_credential(&request.signing_credential).await?;
        let status_code = strategy
            .get_single_status(
                &self.registry,
                &request.connector_instance_id,
                &request.htlc_id,
            )
            .await?;

        debug!(htlc_id = %request.htlc_id, status_code, "[xl-03] Counterparty HTLC status");
        Ok(HtlcStatus {
            htlc_id: request.htlc_id,
            status_code,
            state: HtlcLegState::from_status_code(status_code),
        })
    }

    async fn withdraw_counterparty(
        &self,
        request: WithdrawCounterpartyRequest,
    ) -> Result<TransactionReceipt, HtlcError> {
        let package: HtlcPackage = request.htlc_package.parse()?;
        require("connector_instance_id", &request.connector_instance_id)?;
        require("htlc_id", &request.htlc_id)?;

        let strategy = self.strategy(package)?;
        let credential = self.resolve_credential(&request.signing_credential).await?;
        let receipt = strategy
            .withdraw(
                &self.registry,
                &request.connector_instance_id,
                &request.htlc_id,
                &request.secret,
                &credential,
            )
            .await?;

        info!(htlc_id = %request.htlc_id, status = receipt.status, "[xl-03] Counterparty HTLC withdrawn");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{BesuErc20HtlcPackage, BesuHtlcPackage, InMemoryHtlcLedger};
    use crate::algorithms::{create_hash_lock, generate_random_secret};
    use crate::domain::SecureSecret;
    use shared_types::{encode_hex, ErrorKind};
    use xl_05_plugin_registry::{InMemoryKeychain, Keychain};

    fn setup() -> (Arc<InMemoryHtlcLedger>, Arc<PluginRegistry>, HtlcCoordinator) {
        let registry = Arc::new(PluginRegistry::new());
        let ledger = Arc::new(InMemoryHtlcLedger::new());
        registry.add_handle(ledger.handle("besu-1"), false).unwrap();
        registry
            .add_handle(BesuHtlcPackage::handle("htlc-besu"), false)
            .unwrap();
        registry
            .add_handle(BesuErc20HtlcPackage::handle("htlc-besu-erc20"), false)
            .unwrap();
        let coordinator = HtlcCoordinator::new(Arc::clone(&registry));
        (ledger, registry, coordinator)
    }

    fn alice() -> SigningCredential {
        SigningCredential::PrivateKeyHex {
            eth_account: "0xalice".to_string(),
            secret: "0x01".to_string(),
        }
    }

    fn own_request(package: &str, secret: &SecureSecret) -> OwnHtlcRequest {
        OwnHtlcRequest {
            htlc_package: package.to_string(),
            connector_instance_id: "besu-1".to_string(),
            constructor_args: vec![],
            signing_credential: alice(),
            input_amount: 100,
            output_amount: 1,
            expiration: 1_700_100_000,
            hash_lock: encode_hex(&create_hash_lock(secret)),
            token_address: None,
            receiver: "0xbob".to_string(),
            output_network: "fabric".to_string(),
            output_address: "bob".to_string(),
            gas: Some(6_000_000),
        }
    }

    #[tokio::test]
    async fn test_own_htlc_funds_leg() {
        let (ledger, _, coordinator) = setup();
        let secret = generate_random_secret();

        let response = coordinator
            .own_htlc(own_request("Besu", &secret))
            .await
            .unwrap();
        assert_eq!(response.state, HtlcLegState::Funded);
        assert!(response.receipt.status);
        assert!(response.contract_address.starts_with("0x"));
        assert_eq!(ledger.htlc_count(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_package_makes_no_ledger_call() {
        let (ledger, _, coordinator) = setup();
        let secret = generate_random_secret();

        let err = coordinator
            .own_htlc(own_request("Solana", &secret))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPackage);
        assert!(err.to_string().contains("Besu;BesuErc20"));
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_initialization_is_explicit_error() {
        let (ledger, _, coordinator) = setup();
        ledger.set_fail_initialization(true);

        let err = coordinator
            .own_htlc(own_request("Besu", &generate_random_secret()))
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::InitializationFailed(_)));
        assert_eq!(ledger.htlc_count(), 0);
    }

    #[tokio::test]
    async fn test_erc20_without_token_rejected_before_ledger() {
        let (ledger, _, coordinator) = setup();
        let err = coordinator
            .own_htlc(own_request("BesuErc20", &generate_random_secret()))
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::InvalidArgument(_)));
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_erc20_with_token_funds_leg() {
        let (_, _, coordinator) = setup();
        let mut request = own_request("BesuErc20", &generate_random_secret());
        request.token_address = Some("0xtoken".to_string());
        let response = coordinator.own_htlc(request).await.unwrap();
        assert_eq!(response.state, HtlcLegState::Funded);
    }

    #[tokio::test]
    async fn test_bad_hash_lock_rejected() {
        let (ledger, _, coordinator) = setup();
        let mut request = own_request("Besu", &generate_random_secret());
        request.hash_lock = "abcd".to_string();
        let err = coordinator.own_htlc(request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_counterparty_status_and_withdraw() {
        let (_, _, coordinator) = setup();
        let secret = generate_random_secret();
        let funded = coordinator
            .own_htlc(own_request("Besu", &secret))
            .await
            .unwrap();
        let htlc_id = funded.receipt.htlc_id.unwrap();

        let status = coordinator
            .counterparty_htlc(CounterpartyHtlcRequest {
                htlc_package: "Besu".to_string(),
                connector_instance_id: "besu-1".to_string(),
                htlc_id: htlc_id.clone(),
                signing_credential: SigningCredential::None,
            })
            .await
            .unwrap();
        assert_eq!(status.state, Some(HtlcLegState::Funded));

        let withdraw = |secret: SecureSecret| WithdrawCounterpartyRequest {
            htlc_package: "Besu".to_string(),
            connector_instance_id: "besu-1".to_string(),
            htlc_id: htlc_id.clone(),
            secret,
            signing_credential: alice(),
        };
        let bad = coordinator
            .withdraw_counterparty(withdraw(SecureSecret::new([0u8; 32])))
            .await;
        assert!(matches!(bad, Err(HtlcError::InvalidSecret)));

        let receipt = coordinator
            .withdraw_counterparty(withdraw(secret.clone()))
            .await
            .unwrap();
        assert!(receipt.status);
    }

    #[tokio::test]
    async fn test_keychain_credential_resolution() {
        let (_, registry, coordinator) = setup();
        let keychain = InMemoryKeychain::new("kc-1");
        keychain.set("alice", "0xdeadbeef").await.unwrap();
        registry.add_handle(keychain.into_plugin("keychain-1"), false).unwrap();

        let mut request = own_request("Besu", &generate_random_secret());
        request.signing_credential = SigningCredential::KeychainRef {
            eth_account: "0xalice".to_string(),
            keychain_id: "kc-1".to_string(),
            key_name: "alice".to_string(),
        };
        assert!(coordinator.own_htlc(request.clone()).await.is_ok());

        request.signing_credential = SigningCredential::KeychainRef {
            eth_account: "0xalice".to_string(),
            keychain_id: "kc-1".to_string(),
            key_name: "carol".to_string(),
        };
        let err = coordinator.own_htlc(request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_strategy_swap_takes_effect_next_call() {
        let (_, registry, coordinator) = setup();
        let secret = generate_random_secret();
        coordinator
            .own_htlc(own_request("Besu", &secret))
            .await
            .unwrap();

        let replacement = Arc::new(InMemoryHtlcLedger::new());
        replacement.set_fail_initialization(true);
        registry.add_handle(replacement.handle("besu-1"), true).unwrap();

        let err = coordinator
            .own_htlc(own_request("Besu", &secret))
            .await
            .unwrap_err();
        assert!(matches!(err, HtlcError::InitializationFailed(_)));
        assert_eq!(replacement.call_count(), 1);
    }
}
