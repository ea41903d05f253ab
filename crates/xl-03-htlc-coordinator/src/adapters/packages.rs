//! HTLC Package Strategies
//!
//! `Besu` locks native currency, `BesuErc20` locks an ERC-20 token. Both
//! drive the connector registered under the request's instance id.

use crate::domain::{HtlcError, HtlcPackage, HtlcTerms, ResolvedCredential, TransactionReceipt};
use crate::ports::{ledger_connector, HtlcPackageStrategy};
use async_trait::async_trait;
use std::sync::Arc;
use xl_05_plugin_registry::{Capability, PluginHandle, PluginRegistry};

fn strategy_handle(
    package: HtlcPackage,
    instance_id: String,
    strategy: Arc<dyn HtlcPackageStrategy>,
) -> PluginHandle<dyn HtlcPackageStrategy> {
    PluginHandle::new(
        instance_id,
        package.package_name(),
        Capability::BusinessLogic,
        strategy,
    )
}

/// Native-currency HTLC package.
#[derive(Debug, Default, Clone, Copy)]
pub struct BesuHtlcPackage;

impl BesuHtlcPackage {
    /// Registry handle under `htlc-eth-besu`.
    pub fn handle(instance_id: impl Into<String>) -> PluginHandle<dyn HtlcPackageStrategy> {
        strategy_handle(HtlcPackage::Besu, instance_id.into(), Arc::new(Self))
    }
}

#[async_trait]
impl HtlcPackageStrategy for BesuHtlcPackage {
    fn package(&self) -> HtlcPackage {
        HtlcPackage::Besu
    }

    fn validate_terms(&self, terms: &HtlcTerms) -> Result<(), HtlcError> {
        if terms.input_amount == 0 {
            return Err(HtlcError::InvalidArgument(
                "input_amount must be positive".to_string(),
            ));
        }
        Ok(())
    }

    async fn new_contract(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        contract_address: &str,
        terms: &HtlcTerms,
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError> {
        // Native value transfers carry no token.
        let native = HtlcTerms {
            token_address: None,
            ..terms.clone()
        };
        ledger_connector(registry, connector_id)?
            .create_htlc_contract(contract_address, &native, credential, gas)
            .await
    }
}

/// ERC-20 token HTLC package.
#[derive(Debug, Default, Clone, Copy)]
pub struct BesuErc20HtlcPackage;

impl BesuErc20HtlcPackage {
    /// Registry handle under `htlc-eth-besu-erc20`.
    pub fn handle(instance_id: impl Into<String>) -> PluginHandle<dyn HtlcPackageStrategy> {
        strategy_handle(HtlcPackage::BesuErc20, instance_id.into(), Arc::new(Self))
    }
}

#[async_trait]
impl HtlcPackageStrategy for BesuErc20HtlcPackage {
    fn package(&self) -> HtlcPackage {
        HtlcPackage::BesuErc20
    }

    fn validate_terms(&self, terms: &HtlcTerms) -> Result<(), HtlcError> {
        match terms.token_address.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => {
                return Err(HtlcError::InvalidArgument(
                    "token_address is required for BesuErc20".to_string(),
                ))
            }
        }
        if terms.input_amount == 0 {
            return Err(HtlcError::InvalidArgument(
                "input_amount must be positive".to_string(),
            ));
        }
        Ok(())
    }

    async fn new_contract(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        contract_address: &str,
        terms: &HtlcTerms,
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError> {
        self.validate_terms(terms)?;
        ledger_connector(registry, connector_id)?
            .create_htlc_contract(contract_address, terms, credential, gas)
            .await
    }
}
