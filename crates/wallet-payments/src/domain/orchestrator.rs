//! Payment orchestrator.
//!
//! The single dispatcher between the SDK's milestone events and the
//! registry. Constructed once at application start with its collaborators
//! injected; no module-level singletons.
//!
//! Dispatch order on the completion milestone matters: the txid is
//! attached to the record (`mark_approved`) before the Completion Gateway
//! call is issued, so a crash between the two still leaves a recoverable
//! record.
//!
//! Gateway side effects run in spawned tasks; the dispatcher never blocks
//! local protocol progress on a remote acknowledgement. Approval failures
//! are logged and swallowed. A definitive completion failure (retries
//! exhausted or timeout) moves the payment to `failed`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use wallet_sdk::{SdkError, SdkPaymentData, WalletSdk};
use wallet_types::{
    Payment, PaymentEvent, PaymentId, PaymentRequest, SessionProvider, WalletConfig,
    MAX_MEMO_LEN,
};

use crate::ports::outbound::PaymentGateway;

use super::errors::PaymentError;
use super::registry::{PaymentRegistry, Transition};

/// Metadata key for the address the transfer settles to.
pub const META_RECEIVING_ADDRESS: &str = "receiving_address";
/// Metadata key for the platform settlement address.
pub const META_PLATFORM_WALLET: &str = "platform_wallet_address";
/// Metadata key for the user-supplied settlement address.
pub const META_USER_WALLET: &str = "user_wallet_address";

/// Drives payments through the four-edge protocol.
pub struct PaymentOrchestrator {
    registry: Arc<PaymentRegistry>,
    sdk: Arc<dyn WalletSdk>,
    sessions: Arc<dyn SessionProvider>,
    gateway: Arc<dyn PaymentGateway>,
    config: WalletConfig,
}

impl PaymentOrchestrator {
    /// Creates an orchestrator with an empty registry.
    pub fn new(
        sdk: Arc<dyn WalletSdk>,
        sessions: Arc<dyn SessionProvider>,
        gateway: Arc<dyn PaymentGateway>,
        config: WalletConfig,
    ) -> Self {
        Self {
            registry: Arc::new(PaymentRegistry::new()),
            sdk,
            sessions,
            gateway,
            config,
        }
    }

    /// Shared handle to the registry.
    #[must_use]
    pub fn registry(&self) -> Arc<PaymentRegistry> {
        self.registry.clone()
    }

    /// Validates and submits a payment, returning it in the `pending`
    /// state. Does not block for the full lifecycle; later transitions are
    /// observed via [`PaymentOrchestrator::get_payment_status`].
    ///
    /// # Errors
    /// All errors here occur before the SDK accepts the request and are
    /// surfaced synchronously:
    /// - `NotAuthenticated` - checked first, before any SDK call
    /// - `InvalidAmount` - amount must be positive and finite
    /// - `MemoTooLong`
    /// - `InvalidAddress` - the user address failed the authoritative
    ///   re-check
    /// - `SdkUnavailable` / `Sdk` - the SDK rejected the request
    pub async fn create_payment(&self, request: PaymentRequest) -> Result<Payment, PaymentError> {
        if self.sessions.current_session().is_none() {
            return Err(PaymentError::NotAuthenticated);
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(request.amount));
        }
        if request.memo.len() > MAX_MEMO_LEN {
            return Err(PaymentError::MemoTooLong);
        }
        if !self.sdk.is_available() {
            return Err(PaymentError::SdkUnavailable);
        }

        let PaymentRequest {
            amount,
            memo,
            mut metadata,
        } = request;

        let platform = self.config.platform_wallet_address.clone();
        metadata.insert(
            META_PLATFORM_WALLET.to_string(),
            serde_json::Value::String(platform.as_str().to_string()),
        );

        // The user address was validated when persisted, but the rule is
        // re-checked here, immediately before it enters payment metadata.
        let receiving = match self.sessions.user_wallet_address() {
            Some(address) => {
                if !wallet_types::is_valid(address.as_str()) {
                    return Err(PaymentError::InvalidAddress(address.to_string()));
                }
                metadata.insert(
                    META_USER_WALLET.to_string(),
                    serde_json::Value::String(address.as_str().to_string()),
                );
                address
            }
            None => platform,
        };
        metadata.insert(
            META_RECEIVING_ADDRESS.to_string(),
            serde_json::Value::String(receiving.as_str().to_string()),
        );

        let data = SdkPaymentData {
            amount,
            memo: memo.clone(),
            metadata: metadata.clone(),
        };
        let payment_id = self.sdk.submit_payment(&data).await.map_err(|e| match e {
            SdkError::Unavailable => PaymentError::SdkUnavailable,
            other => PaymentError::Sdk(other),
        })?;

        let payment = Payment::pending(payment_id, amount, memo, metadata);
        self.registry.insert_pending(payment.clone())?;
        info!(payment_id = %payment.payment_id, amount, "payment accepted locally");
        Ok(payment)
    }

    /// Maps one protocol event onto a registry transition and its side
    /// effect. Out-of-order and duplicate delivery is tolerated; nothing
    /// here panics or throws.
    pub async fn handle_event(&self, event: PaymentEvent) {
        match event {
            PaymentEvent::ApprovalRequested { payment_id } => {
                // Status stays pending; the approval acknowledgement is a
                // side channel, not a transition.
                if self.registry.get(&payment_id).is_none() {
                    warn!(payment_id = %payment_id, "approval milestone for unknown payment, dropped");
                    return;
                }
                debug!(payment_id = %payment_id, "approval requested");
                let gateway = self.gateway.clone();
                tokio::spawn(async move {
                    if let Err(e) = gateway.approve(&payment_id).await {
                        warn!(payment_id = %payment_id, error = %e, "approval gateway failed");
                    }
                });
            }

            PaymentEvent::CompletionRequested { payment_id, txid } => {
                // txid goes onto the record before the outbound call.
                match self.registry.mark_approved(&payment_id, &txid) {
                    Transition::Applied => {
                        info!(payment_id = %payment_id, txid = %txid, "payment approved");
                        let gateway = self.gateway.clone();
                        let registry = self.registry.clone();
                        tokio::spawn(async move {
                            match gateway.complete(&payment_id, &txid).await {
                                Ok(()) => {
                                    if registry.mark_completed(&payment_id) == Transition::Applied
                                    {
                                        info!(payment_id = %payment_id, "payment completed");
                                    }
                                }
                                Err(e) => {
                                    error!(
                                        payment_id = %payment_id,
                                        error = %e,
                                        "completion gateway failed, marking payment failed"
                                    );
                                    registry.mark_failed(&payment_id);
                                }
                            }
                        });
                    }
                    Transition::Ignored => {
                        debug!(payment_id = %payment_id, "duplicate completion milestone ignored");
                    }
                    Transition::Rejected => {
                        warn!(payment_id = %payment_id, "completion milestone illegal in current state");
                    }
                    Transition::Unknown => {
                        warn!(payment_id = %payment_id, "completion milestone for unknown payment, dropped");
                    }
                }
            }

            PaymentEvent::Cancelled { payment_id } => {
                match self.registry.mark_cancelled(&payment_id) {
                    Transition::Applied => info!(payment_id = %payment_id, "payment cancelled"),
                    Transition::Ignored => {
                        debug!(payment_id = %payment_id, "duplicate cancel milestone ignored");
                    }
                    Transition::Unknown => {
                        warn!(payment_id = %payment_id, "cancel milestone for unknown payment, dropped");
                    }
                    Transition::Rejected => {}
                }
            }

            PaymentEvent::Errored {
                payment_id,
                message,
            } => {
                warn!(payment_id = %payment_id, message = %message, "SDK reported payment error");
                match self.registry.mark_failed(&payment_id) {
                    Transition::Applied => {}
                    Transition::Ignored => {
                        debug!(payment_id = %payment_id, "error milestone on terminal payment ignored");
                    }
                    Transition::Unknown => {
                        warn!(payment_id = %payment_id, "error milestone for unknown payment, dropped");
                    }
                    Transition::Rejected => {}
                }
            }
        }
    }

    /// Consumes the event channel, feeding every milestone through the
    /// dispatcher until the sending side closes.
    pub fn spawn_dispatcher(
        self: Arc<Self>,
        mut events: mpsc::UnboundedReceiver<PaymentEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.handle_event(event).await;
            }
            debug!("payment event channel closed, dispatcher exiting");
        })
    }

    /// Pure registry lookup; no side effects.
    #[must_use]
    pub fn get_payment_status(&self, id: &PaymentId) -> Option<Payment> {
        self.registry.get(id)
    }

    /// Sweeps terminal registry entries. Returns the number removed.
    pub fn clear_completed_payments(&self) -> usize {
        let removed = self.registry.clear_terminal();
        if removed > 0 {
            debug!(removed, "cleared terminal payments");
        }
        removed
    }
}
