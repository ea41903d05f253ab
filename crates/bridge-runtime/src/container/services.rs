//! # Service Container
//!
//! Builds the registry, registers the development adapters and constructs
//! the three application services on top of it.
//!
//! ## Registered Plugins
//!
//! ```text
//! asset-ledger-memory   Connector      asset store + validator registry
//! htlc-ledger-memory    Connector      HTLC contracts
//! block-source-memory   Connector      blocks for verifier sessions
//! keychain-memory       Keychain       signing keys
//! htlc-eth-besu         BusinessLogic  Besu package strategy
//! htlc-eth-besu-erc20   BusinessLogic  BesuErc20 package strategy
//! ```

use std::sync::Arc;

use tracing::info;

use xl_01_multisig::{MultisigEngine, SignatureScheme};
use xl_02_asset_lifecycle::adapters::ASSET_LEDGER_MEMORY_PACKAGE;
use xl_02_asset_lifecycle::{AssetLifecycleService, InMemoryAssetLedger};
use xl_03_htlc_coordinator::{
    BesuErc20HtlcPackage, BesuHtlcPackage, HtlcCoordinator, InMemoryHtlcLedger,
};
use xl_04_verifier_monitor::{InMemoryBlockSource, MonitorService};
use xl_05_plugin_registry::{InMemoryKeychain, PluginRegistry, RegistryError};

use crate::container::config::BridgeConfig;

/// Central container holding the registry and every service.
pub struct BridgeContainer {
    // =========================================================================
    // COMPOSITION ROOT
    // =========================================================================
    /// Plugin registry shared by all services.
    pub registry: Arc<PluginRegistry>,

    // =========================================================================
    // DEVELOPMENT ADAPTERS
    // =========================================================================
    /// Asset ledger behind the asset lifecycle service.
    pub asset_ledger: Arc<InMemoryAssetLedger>,
    /// Ledger hosting HTLC contracts.
    pub htlc_ledger: Arc<InMemoryHtlcLedger>,
    /// Block source behind verifier sessions.
    pub block_source: Arc<InMemoryBlockSource>,

    // =========================================================================
    // APPLICATION SERVICES
    // =========================================================================
    /// Asset lifecycle (Subsystem 02).
    pub asset_lifecycle: Arc<AssetLifecycleService>,
    /// HTLC coordinator (Subsystem 03).
    pub htlc: Arc<HtlcCoordinator>,
    /// Verifier monitor (Subsystem 04).
    pub monitor: Arc<MonitorService>,

    scheme: SignatureScheme,
}

impl BridgeContainer {
    /// Wire everything from `config`.
    pub fn new(config: &BridgeConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(PluginRegistry::new());
        let connector = &config.connector;

        let asset_ledger = Arc::new(InMemoryAssetLedger::new(
            connector.ledger,
            connector.options(),
        ));
        registry.add_handle(
            asset_ledger.handle(&connector.instance_id, ASSET_LEDGER_MEMORY_PACKAGE),
            false,
        )?;

        let htlc_ledger = Arc::new(InMemoryHtlcLedger::new());
        registry.add_handle(htlc_ledger.handle(&connector.htlc_instance_id), false)?;
        registry.add_handle(BesuHtlcPackage::handle("htlc-besu"), false)?;
        registry.add_handle(BesuErc20HtlcPackage::handle("htlc-besu-erc20"), false)?;

        let keychain = InMemoryKeychain::new(&connector.keychain_id);
        registry.add_handle(keychain.into_plugin(format!("{}-plugin", connector.keychain_id)), false)?;

        let block_source = Arc::new(InMemoryBlockSource::new(config.monitor.start_height));
        registry.add_handle(block_source.handle(&config.monitor.source_instance_id), false)?;

        let scheme = config
            .multisig
            .scheme
            .unwrap_or_else(|| SignatureScheme::for_ledger(connector.ledger));
        let asset_lifecycle = Arc::new(
            AssetLifecycleService::new(Arc::clone(&registry), &connector.instance_id)
                .with_scheme(scheme),
        );
        let htlc = Arc::new(HtlcCoordinator::new(Arc::clone(&registry)));
        let monitor = Arc::new(
            MonitorService::new(Arc::clone(&registry), &config.monitor.source_instance_id)
                .with_poll_interval(config.monitor.poll_interval()),
        );

        info!(
            plugins = registry.len(),
            ledger = %connector.ledger,
            scheme = scheme.as_str(),
            "Bridge container initialized"
        );

        Ok(Self {
            registry,
            asset_ledger,
            htlc_ledger,
            block_source,
            asset_lifecycle,
            htlc,
            monitor,
            scheme,
        })
    }

    /// Engine for attestations on the configured ledger.
    pub fn multisig_engine(&self) -> MultisigEngine {
        MultisigEngine::new(self.scheme)
    }

    /// Stop every verifier session. Returns how many were running.
    pub fn shutdown(&self) -> usize {
        let stopped = self.monitor.stop_all();
        info!(stopped, "Bridge container shut down");
        stopped
    }
}
