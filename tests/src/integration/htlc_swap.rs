//! # HTLC Swap Flows
//!
//! Two-sided atomic swap between two bridges, one ledger each.
//!
//! ```text
//! Alice (ledger A)                       Bob (ledger B)
//! ────────────────                       ──────────────
//! secret, hash_lock
//! own_htlc(A, receiver = bob) ─────────▶ counterparty_htlc(A) == Funded
//!                                        own_htlc(B, receiver = alice, same lock)
//! counterparty_htlc(B) == Funded ◀──────
//! withdraw_counterparty(B, secret) ────▶ secret now public
//!                                        withdraw_counterparty(A, secret)
//! ```

#[cfg(test)]
mod tests {
    use bridge_runtime::{BridgeConfig, BridgeContainer};
    use shared_types::{encode_hex, ErrorKind};
    use xl_03_htlc_coordinator::{
        create_hash_lock, generate_random_secret, CounterpartyHtlcRequest, HtlcCoordinatorApi,
        HtlcLegState, OwnHtlcRequest, SecureSecret, SigningCredential, WithdrawCounterpartyRequest,
    };
    use xl_05_plugin_registry::Keychain;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const EXPIRATION: u64 = 1_700_100_000;

    fn bridge() -> BridgeContainer {
        BridgeContainer::new(&BridgeConfig::default()).unwrap()
    }

    fn credential(account: &str) -> SigningCredential {
        SigningCredential::PrivateKeyHex {
            eth_account: account.to_string(),
            secret: "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d".to_string(),
        }
    }

    fn own_request(package: &str, hash_lock: &str, sender: &str, receiver: &str) -> OwnHtlcRequest {
        OwnHtlcRequest {
            htlc_package: package.to_string(),
            connector_instance_id: "htlc-ledger-1".to_string(),
            constructor_args: vec![],
            signing_credential: credential(sender),
            input_amount: 10,
            output_amount: 1,
            expiration: EXPIRATION,
            hash_lock: hash_lock.to_string(),
            token_address: None,
            receiver: receiver.to_string(),
            output_network: "counterparty".to_string(),
            output_address: receiver.to_string(),
            gas: Some(6_000_000),
        }
    }

    fn status_request(htlc_id: &str) -> CounterpartyHtlcRequest {
        CounterpartyHtlcRequest {
            htlc_package: "Besu".to_string(),
            connector_instance_id: "htlc-ledger-1".to_string(),
            htlc_id: htlc_id.to_string(),
            signing_credential: SigningCredential::None,
        }
    }

    fn withdraw_request(htlc_id: &str, secret: &SecureSecret, account: &str) -> WithdrawCounterpartyRequest {
        WithdrawCounterpartyRequest {
            htlc_package: "Besu".to_string(),
            connector_instance_id: "htlc-ledger-1".to_string(),
            htlc_id: htlc_id.to_string(),
            secret: secret.clone(),
            signing_credential: credential(account),
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_two_sided_swap() {
        let ledger_a = bridge();
        let ledger_b = bridge();

        let secret = generate_random_secret();
        let hash_lock = encode_hex(&create_hash_lock(&secret));

        let alice_leg = ledger_a
            .htlc
            .own_htlc(own_request("Besu", &hash_lock, "0xalice", "0xbob"))
            .await
            .unwrap();
        assert_eq!(alice_leg.state, HtlcLegState::Funded);
        let alice_htlc = alice_leg.receipt.htlc_id.clone().unwrap();

        let seen_by_bob = ledger_a
            .htlc
            .counterparty_htlc(status_request(&alice_htlc))
            .await
            .unwrap();
        assert_eq!(seen_by_bob.state, Some(HtlcLegState::Funded));

        let bob_leg = ledger_b
            .htlc
            .own_htlc(own_request("Besu", &hash_lock, "0xbob", "0xalice"))
            .await
            .unwrap();
        let bob_htlc = bob_leg.receipt.htlc_id.clone().unwrap();

        let alice_claim = ledger_b
            .htlc
            .withdraw_counterparty(withdraw_request(&bob_htlc, &secret, "0xalice"))
            .await
            .unwrap();
        assert!(alice_claim.status);

        let bob_claim = ledger_a
            .htlc
            .withdraw_counterparty(withdraw_request(&alice_htlc, &secret, "0xbob"))
            .await
            .unwrap();
        assert!(bob_claim.status);

        for (ledger, id) in [(&ledger_a, &alice_htlc), (&ledger_b, &bob_htlc)] {
            let status = ledger.htlc.counterparty_htlc(status_request(id)).await.unwrap();
            assert_eq!(status.state, Some(HtlcLegState::Withdrawn));
        }
    }

    #[tokio::test]
    async fn test_expired_leg_cannot_be_withdrawn() {
        let ledger = bridge();
        let secret = generate_random_secret();
        let hash_lock = encode_hex(&create_hash_lock(&secret));

        let leg = ledger
            .htlc
            .own_htlc(own_request("Besu", &hash_lock, "0xalice", "0xbob"))
            .await
            .unwrap();
        let htlc_id = leg.receipt.htlc_id.unwrap();

        ledger.htlc_ledger.set_time(EXPIRATION + 1);
        let status = ledger
            .htlc
            .counterparty_htlc(status_request(&htlc_id))
            .await
            .unwrap();
        assert_eq!(status.state, Some(HtlcLegState::Abandoned));

        let err = ledger
            .htlc
            .withdraw_counterparty(withdraw_request(&htlc_id, &secret, "0xbob"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connector);
    }

    #[tokio::test]
    async fn test_unsupported_package_makes_no_ledger_call() {
        let ledger = bridge();
        let hash_lock = encode_hex(&create_hash_lock(&generate_random_secret()));

        let err = ledger
            .htlc
            .own_htlc(own_request("Fabric", &hash_lock, "0xalice", "0xbob"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPackage);
        assert!(err.to_string().contains("Besu;BesuErc20"));
        assert_eq!(ledger.htlc_ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_erc20_leg_with_keychain_credential() {
        let ledger = bridge();
        let keychain = ledger.registry.resolve_keychain("keychain-1").unwrap();
        keychain.set("alice-key", "0x01").await.unwrap();

        let hash_lock = encode_hex(&create_hash_lock(&generate_random_secret()));
        let mut request = own_request("BesuErc20", &hash_lock, "0xalice", "0xbob");
        request.token_address = Some("0xtoken".to_string());
        request.signing_credential = SigningCredential::KeychainRef {
            eth_account: "0xalice".to_string(),
            keychain_id: "keychain-1".to_string(),
            key_name: "alice-key".to_string(),
        };

        let leg = ledger.htlc.own_htlc(request).await.unwrap();
        assert_eq!(leg.state, HtlcLegState::Funded);
    }

    #[tokio::test]
    async fn test_failed_initialization_surfaces_error() {
        let ledger = bridge();
        ledger.htlc_ledger.set_fail_initialization(true);
        let hash_lock = encode_hex(&create_hash_lock(&generate_random_secret()));

        let err = ledger
            .htlc
            .own_htlc(own_request("Besu", &hash_lock, "0xalice", "0xbob"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InitializationFailed);
        assert_eq!(ledger.htlc_ledger.htlc_count(), 0);
    }
}
