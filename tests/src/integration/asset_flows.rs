//! # Asset Flows
//!
//! Lock on one ledger, attest, copy onto another.
//!
//! ```text
//! ledger A: create ──▶ lock(target = B) ──▶ validators sign payload
//!                                                   │
//! ledger B: register validators ──▶ copy_asset ◀────┘ ──▶ replay = Conflict
//! ```

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use bridge_runtime::{BridgeConfig, BridgeContainer};
    use serde_json::Value;
    use shared_types::{ErrorKind, LedgerKind};
    use xl_01_multisig::{public_key_hex, sign_message, Multisig, MultisigApi, SignatureEntry};
    use xl_02_asset_lifecycle::{
        Asset, AssetError, AssetLifecycleApi, AssetOrigin, ConnectorOptions, CopyAssetRequest,
        CopyPayload, InMemoryAssetLedger,
    };
    use xl_02_asset_lifecycle::adapters::ASSET_LEDGER_MEMORY_PACKAGE;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const VALIDATORS: [&str; 3] = [
        "1111111111111111111111111111111111111111111111111111111111111111",
        "2222222222222222222222222222222222222222222222222222222222222222",
        "3333333333333333333333333333333333333333333333333333333333333333",
    ];

    fn container() -> BridgeContainer {
        BridgeContainer::new(&BridgeConfig::default()).unwrap()
    }

    fn asset_a1() -> Asset {
        Asset::new(
            "A1",
            vec![AssetOrigin::new("D1", "X")],
            BTreeMap::from([("p1".to_string(), "v1".to_string())]),
        )
    }

    fn attest(container: &BridgeContainer, private_key: &str, msg: &str) -> SignatureEntry {
        let scheme = container.multisig_engine().scheme();
        SignatureEntry {
            public_key: public_key_hex(scheme, private_key).unwrap(),
            signature: sign_message(scheme, private_key, msg.as_bytes()).unwrap(),
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_create_then_get_returns_defaults() {
        let bridge = container();
        bridge.asset_lifecycle.create_asset(asset_a1()).await.unwrap();

        let stored = bridge.asset_lifecycle.get_asset("A1").await.unwrap();
        assert_eq!(stored.asset_id, "A1");
        assert!(!stored.locked);
        assert_eq!(stored.properties.get("p1").map(String::as_str), Some("v1"));
    }

    #[tokio::test]
    async fn test_second_lock_fails_and_keeps_first() {
        let bridge = container();
        bridge.asset_lifecycle.create_asset(asset_a1()).await.unwrap();
        let receiver = public_key_hex(bridge.multisig_engine().scheme(), VALIDATORS[0]).unwrap();

        let locked = bridge
            .asset_lifecycle
            .lock_asset("A1", "D2", &receiver)
            .await
            .unwrap();
        assert!(locked.locked);

        let err = bridge
            .asset_lifecycle
            .lock_asset("A1", "D2", &receiver)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyLocked);

        let err = bridge
            .asset_lifecycle
            .lock_asset("A1", "D3", &receiver)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyLocked);

        let stored = bridge.asset_lifecycle.get_asset("A1").await.unwrap();
        assert_eq!(stored.target_dlt_id.as_deref(), Some("D2"));
    }

    #[tokio::test]
    async fn test_locked_asset_copied_across_ledgers() {
        let source = container();
        let target = container();

        source.asset_lifecycle.create_asset(asset_a1()).await.unwrap();
        let receiver = public_key_hex(source.multisig_engine().scheme(), VALIDATORS[2]).unwrap();
        let locked = source
            .asset_lifecycle
            .lock_asset("A1", "DLT-B", &receiver)
            .await
            .unwrap();

        for (i, key) in VALIDATORS.iter().enumerate() {
            let public_key = public_key_hex(target.multisig_engine().scheme(), key).unwrap();
            target
                .asset_lifecycle
                .add_foreign_validator(&public_key, &format!("validator-{i}"))
                .await
                .unwrap();
        }

        let msg = CopyPayload::from_asset(&locked, "DLT-A").to_message().unwrap();
        let request = CopyAssetRequest {
            num_good: 2,
            msg: msg.clone(),
            signatures: vec![
                attest(&source, VALIDATORS[0], &msg),
                attest(&source, VALIDATORS[1], &msg),
            ],
        };

        let copied = target.asset_lifecycle.copy_asset(request.clone()).await.unwrap();
        assert_eq!(copied.asset_id, "A1");
        assert!(!copied.locked);
        assert_eq!(copied.origin.first().unwrap().origin_dlt_id, "D1");
        assert_eq!(copied.origin.last().unwrap().origin_dlt_id, "DLT-A");

        let replay = target.asset_lifecycle.copy_asset(request).await.unwrap_err();
        assert!(matches!(replay, AssetError::Conflict(_)));
        assert_eq!(target.asset_ledger.asset_count(), 1);
    }

    #[tokio::test]
    async fn test_copy_below_threshold_rejected() {
        let bridge = container();
        let public_key = public_key_hex(bridge.multisig_engine().scheme(), VALIDATORS[0]).unwrap();
        bridge
            .asset_lifecycle
            .add_foreign_validator(&public_key, "validator-0")
            .await
            .unwrap();

        let msg = CopyPayload::from_asset(&asset_a1(), "DLT-A").to_message().unwrap();
        let err = bridge
            .asset_lifecycle
            .copy_asset(CopyAssetRequest {
                num_good: 5,
                msg: msg.clone(),
                signatures: vec![attest(&bridge, VALIDATORS[0], &msg)],
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientSignatures);
        assert!(err.to_string().contains("Good signatures are less than expected"));
        assert_eq!(bridge.asset_ledger.asset_count(), 0);
    }

    #[tokio::test]
    async fn test_multisig_preserves_order() {
        let bridge = container();
        let good = attest(&bridge, VALIDATORS[0], "Hello world!");

        let mut multisig = Multisig::new(b"Hello world!".to_vec());
        multisig.add_signature(good.public_key, good.signature);
        multisig.add_signature("fakePubKey", "fakeSignature");

        let results = bridge.multisig_engine().verify(&multisig).unwrap();
        assert_eq!(results, vec![true, false]);

        let err = bridge.multisig_engine().verify(&Multisig::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingMessage);
    }

    #[tokio::test]
    async fn test_connector_swap_takes_effect_next_call() {
        let bridge = container();
        bridge.asset_lifecycle.create_asset(asset_a1()).await.unwrap();
        assert!(bridge.asset_lifecycle.get_asset("A1").await.is_ok());

        let options = ConnectorOptions::with_url("http://localhost:7051")
            .with("username", "admin")
            .with("orgName", "org1");
        let replacement = Arc::new(InMemoryAssetLedger::new(LedgerKind::Fabric, options));
        let displaced = bridge
            .registry
            .add_handle(
                replacement.handle("asset-ledger-1", ASSET_LEDGER_MEMORY_PACKAGE),
                true,
            )
            .unwrap();
        assert_eq!(displaced, 1);

        let err = bridge.asset_lifecycle.get_asset("A1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(replacement.call_count(), 1);
    }

    #[tokio::test]
    async fn test_runtime_option_mutation_is_config_error() {
        let bridge = container();
        bridge.asset_ledger.set_option("url", Value::from(42));

        let calls_before = bridge.asset_ledger.call_count();
        let err = bridge.asset_lifecycle.get_asset("A1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigValidation);
        assert_eq!(bridge.asset_ledger.call_count(), calls_before);
    }
}
