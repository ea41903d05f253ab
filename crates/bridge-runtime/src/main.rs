//! # Bridge Runtime
//!
//! Entry point of the cross-ledger bridge.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `XL_*` overrides)
//! 2. Install logging
//! 3. Validate configuration
//! 4. Build the container (registry, adapters, services)
//! 5. Start a verifier session that logs matched transactions
//! 6. Wait for Ctrl+C, then stop every session

use anyhow::Result;
use bridge_runtime::{init_logging, BridgeConfig, BridgeContainer};
use tracing::info;
use xl_04_verifier_monitor::VerifierMonitorApi;

/// Client id of the session the binary runs itself.
const RUNTIME_CLIENT_ID: &str = "bridge-runtime";

#[tokio::main]
async fn main() -> Result<()> {
    let config = BridgeConfig::from_env()?;
    init_logging(&config.logging)?;
    config.validate()?;

    let container = BridgeContainer::new(&config)?;

    let mut subscription = container
        .monitor
        .start_monitor(RUNTIME_CLIENT_ID, &config.monitor.default_filter_key)
        .await?;
    let printer = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            for tx in &event.block_data {
                info!(
                    block = tx.block_height,
                    tx_id = %tx.tx_id,
                    family = %tx.payload.family,
                    "[xl-04] Matched transaction"
                );
            }
        }
    });

    info!(
        filter_key = %config.monitor.default_filter_key,
        poll_interval_ms = config.monitor.poll_interval_ms,
        "Bridge is running. Press Ctrl+C to stop."
    );
    tokio::signal::ctrl_c().await?;

    container.shutdown();
    printer.await?;
    Ok(())
}
