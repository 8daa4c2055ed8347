//! # Integration Test Flows
//!
//! Full payment lifecycles wired across wallet-sdk, wallet-auth, and
//! wallet-payments, exactly as the application assembles them: one stub
//! SDK, one session manager, one orchestrator, one event channel feeding
//! the dispatcher.
//!
//! ## Flows tested
//!
//! 1. **Happy path**: authenticate, create, approval milestone, completion
//!    milestone, gateway acknowledgement, terminal `completed`.
//! 2. **Pre-flight rejection**: no session means no SDK call.
//! 3. **Cancellation and duplicate delivery**: terminal states hold.
//! 4. **Registry sweep**: only terminal records are cleared.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::mpsc;

    use wallet_auth::{AuthSessionManager, InMemorySessionStore};
    use wallet_payments::{GatewayError, PaymentGateway, PaymentOrchestrator};
    use wallet_sdk::{Scope, StubWalletSdk};
    use wallet_types::{
        PaymentEvent, PaymentId, PaymentRequest, PaymentStatus, TxId, WalletConfig,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Records every outbound gateway call; always acknowledges.
    #[derive(Default)]
    struct RecordingGateway {
        approvals: Mutex<Vec<PaymentId>>,
        completions: Mutex<Vec<(PaymentId, TxId)>>,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn approve(&self, payment_id: &PaymentId) -> Result<(), GatewayError> {
            self.approvals.lock().push(payment_id.clone());
            Ok(())
        }

        async fn complete(&self, payment_id: &PaymentId, txid: &TxId) -> Result<(), GatewayError> {
            self.completions
                .lock()
                .push((payment_id.clone(), txid.clone()));
            Ok(())
        }
    }

    /// The full wiring a running application would hold.
    struct App {
        sdk: Arc<StubWalletSdk>,
        auth: Arc<AuthSessionManager>,
        orchestrator: Arc<PaymentOrchestrator>,
        gateway: Arc<RecordingGateway>,
    }

    fn assemble() -> App {
        crate::integration::init_tracing();
        let sdk = Arc::new(StubWalletSdk::new());
        let auth = Arc::new(AuthSessionManager::new(
            sdk.clone(),
            Arc::new(InMemorySessionStore::new()),
        ));
        let gateway = Arc::new(RecordingGateway::default());
        let orchestrator = Arc::new(PaymentOrchestrator::new(
            sdk.clone(),
            auth.clone(),
            gateway.clone(),
            WalletConfig::default(),
        ));

        let (tx, rx) = mpsc::unbounded_channel();
        sdk.attach_events(tx.clone());
        auth.forward_incomplete_payments_to(tx);
        orchestrator.clone().spawn_dispatcher(rx);

        App {
            sdk,
            auth,
            orchestrator,
            gateway,
        }
    }

    async fn wait_for_status(app: &App, id: &PaymentId, status: PaymentStatus) {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                if app.orchestrator.get_payment_status(id).map(|p| p.status) == Some(status) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("payment {id} never reached {status:?}"));
    }

    // =============================================================================
    // INTEGRATION TESTS: FULL PAYMENT LIFECYCLE
    // =============================================================================

    /// The complete happy path, end to end through all four crates.
    #[tokio::test]
    async fn test_happy_path_payment_reaches_completed() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();
        assert!(app.auth.is_authenticated());

        app.sdk.script_payment_ids([PaymentId::from("p1")]);
        let payment = app
            .orchestrator
            .create_payment(PaymentRequest::new(12.5, "coffee"))
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);

        // The SDK reports its milestones through the attached channel.
        app.sdk.fire(PaymentEvent::ApprovalRequested {
            payment_id: payment.payment_id.clone(),
        });
        app.sdk.fire(PaymentEvent::CompletionRequested {
            payment_id: payment.payment_id.clone(),
            txid: TxId::from("tx-abc"),
        });

        wait_for_status(&app, &payment.payment_id, PaymentStatus::Completed).await;
        let done = app
            .orchestrator
            .get_payment_status(&payment.payment_id)
            .unwrap();
        assert_eq!(done.txid, Some(TxId::from("tx-abc")));

        // Both gateways acknowledged exactly once.
        assert_eq!(app.gateway.approvals.lock().clone(), vec![payment.payment_id.clone()]);
        assert_eq!(
            app.gateway.completions.lock().clone(),
            vec![(payment.payment_id, TxId::from("tx-abc"))]
        );
    }

    /// Without a session the request dies before the SDK sees it.
    #[tokio::test]
    async fn test_unauthenticated_payment_never_reaches_sdk() {
        let app = assemble();

        let result = app
            .orchestrator
            .create_payment(PaymentRequest::new(5.0, "tip"))
            .await;

        assert!(result.is_err());
        assert!(app.sdk.submitted().is_empty());
        assert!(app.orchestrator.registry().is_empty());
    }

    /// User cancels mid-flight; later duplicate cancels change nothing.
    #[tokio::test]
    async fn test_cancellation_is_terminal_and_idempotent() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();

        app.sdk.script_payment_ids([PaymentId::from("p1")]);
        let payment = app
            .orchestrator
            .create_payment(PaymentRequest::new(3.0, "tip"))
            .await
            .unwrap();

        app.sdk.fire(PaymentEvent::Cancelled {
            payment_id: payment.payment_id.clone(),
        });
        wait_for_status(&app, &payment.payment_id, PaymentStatus::Cancelled).await;
        let first = app
            .orchestrator
            .get_payment_status(&payment.payment_id)
            .unwrap();

        // Duplicate delivery after the terminal state.
        app.sdk.fire(PaymentEvent::Cancelled {
            payment_id: payment.payment_id.clone(),
        });
        app.sdk.fire(PaymentEvent::CompletionRequested {
            payment_id: payment.payment_id.clone(),
            txid: TxId::from("tx-late"),
        });
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(
            app.orchestrator
                .get_payment_status(&payment.payment_id)
                .unwrap(),
            first
        );
        assert!(app.gateway.completions.lock().is_empty());
    }

    /// SDK error milestone fails the payment.
    #[tokio::test]
    async fn test_sdk_error_milestone_fails_payment() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();

        app.sdk.script_payment_ids([PaymentId::from("p1")]);
        let payment = app
            .orchestrator
            .create_payment(PaymentRequest::new(3.0, "tip"))
            .await
            .unwrap();

        app.sdk.fire(PaymentEvent::Errored {
            payment_id: payment.payment_id.clone(),
            message: "user closed wallet".to_string(),
        });

        wait_for_status(&app, &payment.payment_id, PaymentStatus::Failed).await;
    }

    /// Several payments run independently; the sweep removes exactly the
    /// terminal ones.
    #[tokio::test]
    async fn test_concurrent_payments_and_terminal_sweep() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();

        app.sdk.script_payment_ids([
            PaymentId::from("p1"),
            PaymentId::from("p2"),
            PaymentId::from("p3"),
        ]);
        let mut ids = Vec::new();
        for amount in [1.0, 2.0, 3.0] {
            let payment = app
                .orchestrator
                .create_payment(PaymentRequest::new(amount, "batch"))
                .await
                .unwrap();
            ids.push(payment.payment_id);
        }

        // p1 completes, p2 cancels, p3 stays pending.
        app.sdk.fire(PaymentEvent::CompletionRequested {
            payment_id: ids[0].clone(),
            txid: TxId::from("tx-1"),
        });
        app.sdk.fire(PaymentEvent::Cancelled {
            payment_id: ids[1].clone(),
        });
        wait_for_status(&app, &ids[0], PaymentStatus::Completed).await;
        wait_for_status(&app, &ids[1], PaymentStatus::Cancelled).await;

        assert_eq!(app.orchestrator.registry().pending_count(), 1);
        assert_eq!(app.orchestrator.clear_completed_payments(), 2);
        assert!(app.orchestrator.get_payment_status(&ids[0]).is_none());
        assert!(app.orchestrator.get_payment_status(&ids[1]).is_none());
        assert_eq!(
            app.orchestrator.get_payment_status(&ids[2]).unwrap().status,
            PaymentStatus::Pending
        );
    }

    /// Sign-out mid-flight: in-flight payments keep orchestrating, but new
    /// ones are refused.
    #[tokio::test]
    async fn test_sign_out_blocks_new_payments_only() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();

        app.sdk.script_payment_ids([PaymentId::from("p1")]);
        let payment = app
            .orchestrator
            .create_payment(PaymentRequest::new(2.0, "tip"))
            .await
            .unwrap();

        app.auth.sign_out().await;
        assert!(!app.auth.is_authenticated());

        // New payments refused.
        assert!(app
            .orchestrator
            .create_payment(PaymentRequest::new(2.0, "tip"))
            .await
            .is_err());

        // But the in-flight one still completes.
        app.sdk.fire(PaymentEvent::CompletionRequested {
            payment_id: payment.payment_id.clone(),
            txid: TxId::from("tx-1"),
        });
        wait_for_status(&app, &payment.payment_id, PaymentStatus::Completed).await;
    }

    /// The user's validated address wins over the platform default as the
    /// receiving address.
    #[tokio::test]
    async fn test_user_address_flows_into_payment_metadata() {
        let app = assemble();
        app.auth.authenticate(&[Scope::Payments]).await.unwrap();
        let address = format!("G{}", "C".repeat(55));
        app.auth.set_user_wallet_address(&address).unwrap();

        app.sdk.script_payment_ids([PaymentId::from("p1")]);
        let payment = app
            .orchestrator
            .create_payment(PaymentRequest::new(4.0, "tip"))
            .await
            .unwrap();

        assert_eq!(
            payment.metadata["receiving_address"],
            serde_json::Value::String(address)
        );
    }
}
