//! # Monitor Flows
//!
//! Ledger → verifier session → business logic → asset lifecycle.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use bridge_runtime::{BridgeConfig, BridgeContainer};
    use parking_lot::Mutex;
    use serde_json::json;
    use tokio::time::timeout;
    use xl_02_asset_lifecycle::{Asset, AssetLifecycleApi, AssetLifecycleService};
    use xl_04_verifier_monitor::{
        Block, BlockEvent, BusinessLogicPlugin, MonitorError, RawTransaction, VerifierMonitorApi,
    };
    use xl_05_plugin_registry::{Capability, PluginHandle};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const WAIT: Duration = Duration::from_secs(2);

    fn bridge(start_height: u64) -> BridgeContainer {
        let mut config = BridgeConfig::default();
        config.monitor.start_height = start_height;
        config.monitor.poll_interval_ms = 10;
        BridgeContainer::new(&config).unwrap()
    }

    fn block(height: u64, txs: &[(&str, serde_json::Value)]) -> Block {
        Block {
            height,
            transactions: txs
                .iter()
                .enumerate()
                .map(|(i, (family, data))| RawTransaction {
                    tx_id: format!("tx-{height}-{i}"),
                    payload: json!({ "family": family, "data": data }).to_string().into_bytes(),
                })
                .collect(),
        }
    }

    /// Creates one asset per matched transaction.
    struct AssetMinter {
        assets: Arc<AssetLifecycleService>,
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl BusinessLogicPlugin for AssetMinter {
        async fn on_event(&self, _client_id: &str, event: BlockEvent) -> Result<(), MonitorError> {
            self.seen.lock().push(event.block_data.len());
            for tx in event.block_data {
                let asset_id = tx.payload.data["asset_id"]
                    .as_str()
                    .ok_or_else(|| MonitorError::MalformedPayload(tx.tx_id.clone()))?
                    .to_string();
                self.assets
                    .create_asset(Asset::new(asset_id, vec![], BTreeMap::new()))
                    .await
                    .map_err(|e| MonitorError::Plugin(e.to_string()))?;
            }
            Ok(())
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_blocks_ten_to_thirteen_single_callback() {
        let bridge = bridge(10);
        let mut subscription = bridge
            .monitor
            .start_monitor("client1", "sometype")
            .await
            .unwrap();

        bridge.block_source.push_block(block(11, &[("other", json!({}))]));
        bridge
            .block_source
            .push_block(block(12, &[("sometype", json!({ "n": 1 }))]));
        bridge.block_source.push_block(block(13, &[]));

        let event = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
        assert_eq!(event.status, 200);
        assert_eq!(event.block_data.len(), 1);
        assert_eq!(event.block_data[0].block_height, 12);
        assert_eq!(bridge.monitor.current_height("client1"), Some(13));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(subscription.try_recv().is_none());

        bridge.monitor.stop_monitor("client1");
        bridge.monitor.stop_monitor("client1");
        assert!(!bridge.monitor.is_active("client1"));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let bridge = bridge(0);
        let mut transfers = bridge.monitor.start_monitor("c1", "transfer").await.unwrap();
        let mut mints = bridge.monitor.start_monitor("c2", "mint").await.unwrap();

        bridge.block_source.push_block(block(
            1,
            &[("transfer", json!({})), ("mint", json!({})), ("mint", json!({}))],
        ));

        let t = timeout(WAIT, transfers.recv()).await.unwrap().unwrap();
        let m = timeout(WAIT, mints.recv()).await.unwrap().unwrap();
        assert_eq!(t.block_data.len(), 1);
        assert_eq!(m.block_data.len(), 2);

        drop(transfers);
        timeout(WAIT, async {
            while bridge.monitor.is_active("c1") {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert!(bridge.monitor.is_active("c2"));
    }

    #[tokio::test]
    async fn test_events_drive_asset_creation() {
        let bridge = bridge(0);
        let minter = Arc::new(AssetMinter {
            assets: Arc::clone(&bridge.asset_lifecycle),
            seen: Mutex::new(Vec::new()),
        });
        let inner: Arc<dyn BusinessLogicPlugin> = minter.clone();
        bridge
            .registry
            .add_handle(
                PluginHandle::new("minter-1", "asset-minter", Capability::BusinessLogic, inner),
                false,
            )
            .unwrap();

        let dispatcher = bridge
            .monitor
            .attach_plugin("minter", "mint", "minter-1")
            .await
            .unwrap();
        bridge.block_source.push_block(block(
            1,
            &[
                ("mint", json!({ "asset_id": "M1" })),
                ("mint", json!({ "asset_id": "M2" })),
            ],
        ));

        timeout(WAIT, async {
            while bridge.asset_ledger.asset_count() < 2 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert!(bridge.asset_lifecycle.get_asset("M2").await.is_ok());
        assert_eq!(*minter.seen.lock(), vec![2]);

        assert_eq!(bridge.shutdown(), 1);
        timeout(WAIT, dispatcher).await.unwrap().unwrap();
    }
}
