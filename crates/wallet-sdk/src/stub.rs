//! Scriptable stub SDK.
//!
//! Stands in for the real wallet-network SDK in tests and local
//! development. Grants, failures, and payment milestones are all driven by
//! the test, so every protocol edge can be exercised deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use wallet_types::{AuthGrant, PaymentEvent, PaymentId};

use crate::port::{Scope, SdkError, SdkPaymentData, WalletSdk};

/// A scriptable test double for the wallet SDK.
///
/// - `authenticate` returns the configured grant, or the next injected
///   failure (one-shot).
/// - `submit_payment` records the request and mints a payment id (uuid v4
///   unless ids were scripted).
/// - Payment milestones are pushed with [`StubWalletSdk::fire`] into the
///   event channel attached by the orchestrator wiring.
pub struct StubWalletSdk {
    available: AtomicBool,
    grant: Mutex<AuthGrant>,
    next_auth_error: Mutex<Option<SdkError>>,
    next_submit_error: Mutex<Option<SdkError>>,
    scripted_ids: Mutex<VecDeque<PaymentId>>,
    submitted: Mutex<Vec<SdkPaymentData>>,
    authenticate_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    events: Mutex<Option<mpsc::UnboundedSender<PaymentEvent>>>,
}

impl StubWalletSdk {
    /// Creates a stub with a default grant (`u1` / `alice` / `tok1`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            grant: Mutex::new(AuthGrant {
                user_id: "u1".to_string(),
                username: "alice".to_string(),
                access_token: "tok1".to_string(),
                incomplete_payments: Vec::new(),
            }),
            next_auth_error: Mutex::new(None),
            next_submit_error: Mutex::new(None),
            scripted_ids: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            authenticate_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            events: Mutex::new(None),
        }
    }

    /// Creates a stub that authenticates with the given grant.
    #[must_use]
    pub fn with_grant(grant: AuthGrant) -> Self {
        let stub = Self::new();
        *stub.grant.lock() = grant;
        stub
    }

    /// Controls `is_available`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Replaces the grant returned by subsequent `authenticate` calls.
    pub fn set_grant(&self, grant: AuthGrant) {
        *self.grant.lock() = grant;
    }

    /// Injects a failure for the next `authenticate` call (one-shot).
    pub fn fail_authenticate(&self, error: SdkError) {
        *self.next_auth_error.lock() = Some(error);
    }

    /// Injects a failure for the next `submit_payment` call (one-shot).
    pub fn fail_submit(&self, error: SdkError) {
        *self.next_submit_error.lock() = Some(error);
    }

    /// Scripts the payment ids handed out by `submit_payment`, in order.
    pub fn script_payment_ids<I>(&self, ids: I)
    where
        I: IntoIterator<Item = PaymentId>,
    {
        self.scripted_ids.lock().extend(ids);
    }

    /// Attaches the event channel milestones are delivered on.
    pub fn attach_events(&self, sender: mpsc::UnboundedSender<PaymentEvent>) {
        *self.events.lock() = Some(sender);
    }

    /// Delivers a payment milestone, as the real SDK bridge would.
    ///
    /// Milestones fired before a channel is attached are dropped, matching
    /// an SDK callback arriving with no listener registered.
    pub fn fire(&self, event: PaymentEvent) {
        if let Some(sender) = self.events.lock().as_ref() {
            // Receiver dropped means the dispatcher is gone; nothing to do.
            let _ = sender.send(event);
        }
    }

    /// All payment data passed to `submit_payment`, in call order.
    #[must_use]
    pub fn submitted(&self) -> Vec<SdkPaymentData> {
        self.submitted.lock().clone()
    }

    /// Number of `authenticate` calls made.
    #[must_use]
    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    /// Number of `sign_out` calls made.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

impl Default for StubWalletSdk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletSdk for StubWalletSdk {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn authenticate(&self, _scopes: &[Scope]) -> Result<AuthGrant, SdkError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        if !self.is_available() {
            return Err(SdkError::Unavailable);
        }
        if let Some(error) = self.next_auth_error.lock().take() {
            return Err(error);
        }
        Ok(self.grant.lock().clone())
    }

    async fn submit_payment(&self, data: &SdkPaymentData) -> Result<PaymentId, SdkError> {
        if !self.is_available() {
            return Err(SdkError::Unavailable);
        }
        if let Some(error) = self.next_submit_error.lock().take() {
            return Err(error);
        }
        self.submitted.lock().push(data.clone());
        let id = self
            .scripted_ids
            .lock()
            .pop_front()
            .unwrap_or_else(|| PaymentId(uuid::Uuid::new_v4().to_string()));
        Ok(id)
    }

    async fn sign_out(&self) -> Result<(), SdkError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
