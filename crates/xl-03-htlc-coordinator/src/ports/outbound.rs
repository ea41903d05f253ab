//! # Outbound Ports (SPI)
//!
//! Two seams: the ledger connector that actually talks to a chain, and the
//! package strategy that knows which contract family to drive on it.

use crate::domain::{
    HtlcError, HtlcPackage, HtlcTerms, ResolvedCredential, SecureSecret, TransactionReceipt,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use xl_05_plugin_registry::PluginRegistry;

/// Contract-invocation primitives of an EVM ledger connector.
///
/// Hash-lock, expiry and state checks are enforced by the contract and come
/// back as `InvalidSecret`, `Expired` or `InvalidTransition`.
#[async_trait]
pub trait HtlcLedgerConnector: Send + Sync {
    /// Deploy the logic contract for `package`.
    async fn initialize_htlc(
        &self,
        package: HtlcPackage,
        constructor_args: &[Value],
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError>;

    /// Create and fund an HTLC on a deployed logic contract.
    async fn create_htlc_contract(
        &self,
        contract_address: &str,
        terms: &HtlcTerms,
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError>;

    /// Raw status code of an HTLC (`0` for unknown ids).
    async fn htlc_status(&self, htlc_id: &str) -> Result<u8, HtlcError>;

    /// Withdraw an HTLC with its pre-image.
    async fn withdraw_htlc(
        &self,
        htlc_id: &str,
        secret: &SecureSecret,
        credential: &ResolvedCredential,
    ) -> Result<TransactionReceipt, HtlcError>;
}

/// One HTLC package implementation.
///
/// Strategies are registered under [`HtlcPackage::package_name`] and resolve
/// their ledger connector from `registry` on every call.
#[async_trait]
pub trait HtlcPackageStrategy: Send + Sync {
    /// Package this strategy drives.
    fn package(&self) -> HtlcPackage;

    /// Reject terms this package cannot honour. Runs before any ledger call.
    fn validate_terms(&self, _terms: &HtlcTerms) -> Result<(), HtlcError> {
        Ok(())
    }

    /// Deploy the logic contract.
    async fn initialize(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        constructor_args: &[Value],
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError> {
        let package = self.package();
        debug!(package = %package, connector_id, "[xl-03] Deploying logic contract");
        ledger_connector(registry, connector_id)?
            .initialize_htlc(package, constructor_args, credential, gas)
            .await
    }

    /// Create the HTLC on `contract_address`.
    async fn new_contract(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        contract_address: &str,
        terms: &HtlcTerms,
        credential: &ResolvedCredential,
        gas: Option<u64>,
    ) -> Result<TransactionReceipt, HtlcError>;

    /// Raw status code of `htlc_id`.
    async fn get_single_status(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        htlc_id: &str,
    ) -> Result<u8, HtlcError> {
        ledger_connector(registry, connector_id)?
            .htlc_status(htlc_id)
            .await
    }

    /// Withdraw `htlc_id` with `secret`.
    async fn withdraw(
        &self,
        registry: &PluginRegistry,
        connector_id: &str,
        htlc_id: &str,
        secret: &SecureSecret,
        credential: &ResolvedCredential,
    ) -> Result<TransactionReceipt, HtlcError> {
        ledger_connector(registry, connector_id)?
            .withdraw_htlc(htlc_id, secret, credential)
            .await
    }
}

/// Connector registered as `connector_id`, resolved at call time.
pub fn ledger_connector(
    registry: &PluginRegistry,
    connector_id: &str,
) -> Result<Arc<dyn HtlcLedgerConnector>, HtlcError> {
    Ok(registry.resolve::<dyn HtlcLedgerConnector>(connector_id)?)
}
