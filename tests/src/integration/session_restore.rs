//! # Session Restore Flows
//!
//! Simulates process restarts: a session persisted by one
//! [`AuthSessionManager`] must be restored by a fresh one backed by the
//! same on-disk store, without any network round trip.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use wallet_auth::{AuthSessionManager, JsonFileSessionStore};
    use wallet_sdk::{Scope, StubWalletSdk};
    use wallet_types::{
        AuthGrant, IncompletePayment, PaymentEvent, PaymentId, SessionProvider, TxId,
    };

    fn manager_at(
        dir: &std::path::Path,
        sdk: Arc<StubWalletSdk>,
    ) -> Arc<AuthSessionManager> {
        crate::integration::init_tracing();
        let store = Arc::new(JsonFileSessionStore::open(dir).unwrap());
        Arc::new(AuthSessionManager::new(sdk, store))
    }

    /// Authenticate, "restart", restore: the second process is
    /// authenticated without calling the SDK again.
    #[tokio::test]
    async fn test_session_survives_restart_without_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let sdk = Arc::new(StubWalletSdk::new());

        let first = manager_at(dir.path(), sdk.clone());
        let session = first.authenticate(&[Scope::Payments]).await.unwrap();
        assert_eq!(sdk.authenticate_calls(), 1);
        drop(first);

        let second = manager_at(dir.path(), sdk.clone());
        let state = second.restore();
        assert!(state.is_authenticated());
        assert_eq!(second.session().unwrap(), session);
        // Trust on first use: no fresh SDK round trip.
        assert_eq!(sdk.authenticate_calls(), 1);
    }

    /// An unavailable SDK at restore time invalidates the stored session
    /// for good.
    #[tokio::test]
    async fn test_restore_with_unavailable_sdk_clears_store() {
        let dir = tempfile::tempdir().unwrap();
        let sdk = Arc::new(StubWalletSdk::new());

        manager_at(dir.path(), sdk.clone())
            .authenticate(&[Scope::Payments])
            .await
            .unwrap();

        sdk.set_available(false);
        let second = manager_at(dir.path(), sdk.clone());
        assert!(!second.restore().is_authenticated());

        // Even with the SDK back, the cleared store stays cleared.
        sdk.set_available(true);
        let third = manager_at(dir.path(), sdk);
        assert!(!third.restore().is_authenticated());
    }

    /// A corrupt session file is treated as absence, not an error.
    #[tokio::test]
    async fn test_corrupt_session_file_restores_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), b"{not json").unwrap();

        let manager = manager_at(dir.path(), Arc::new(StubWalletSdk::new()));
        assert!(!manager.restore().is_authenticated());
    }

    /// Sign-out clears the session but keeps the wallet address.
    #[tokio::test]
    async fn test_sign_out_clears_session_keeps_address() {
        let dir = tempfile::tempdir().unwrap();
        let sdk = Arc::new(StubWalletSdk::new());
        let address = format!("G{}", "B".repeat(55));

        let first = manager_at(dir.path(), sdk.clone());
        first.authenticate(&[Scope::Payments]).await.unwrap();
        first.set_user_wallet_address(&address).unwrap();
        first.sign_out().await;
        drop(first);

        let second = manager_at(dir.path(), sdk);
        assert!(!second.restore().is_authenticated());
        assert_eq!(
            second.user_wallet_address().map(|a| a.to_string()),
            Some(address)
        );
    }

    /// Incomplete payments reported by the SDK at authentication time are
    /// forwarded as completion milestones, but only those carrying a txid.
    #[tokio::test]
    async fn test_incomplete_payments_forwarded_on_authenticate() {
        let dir = tempfile::tempdir().unwrap();
        let sdk = Arc::new(StubWalletSdk::with_grant(AuthGrant {
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            access_token: "tok1".to_string(),
            incomplete_payments: vec![
                IncompletePayment {
                    payment_id: PaymentId::from("orphan-1"),
                    txid: Some(TxId::from("tx-orphan")),
                },
                IncompletePayment {
                    payment_id: PaymentId::from("orphan-2"),
                    txid: None,
                },
            ],
        }));

        let manager = manager_at(dir.path(), sdk);
        let (tx, mut rx) = mpsc::unbounded_channel();
        manager.forward_incomplete_payments_to(tx);
        manager.authenticate(&[Scope::Payments]).await.unwrap();

        let event = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout waiting for forwarded milestone")
            .expect("channel closed");
        assert_eq!(
            event,
            PaymentEvent::CompletionRequested {
                payment_id: PaymentId::from("orphan-1"),
                txid: TxId::from("tx-orphan"),
            }
        );
        // The record with no txid has nothing to complete and is dropped.
        assert!(rx.try_recv().is_err());
    }
}
