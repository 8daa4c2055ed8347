//! Authentication session manager.
//!
//! Owns the authentication state machine and is the only component that
//! calls the SDK's authenticate/sign-out primitives. Constructed once at
//! application start and passed by reference to consumers; there is no
//! module-level singleton.
//!
//! Every state transition is delivered synchronously to all subscribers
//! before the call that triggered it returns; the `Authenticating -> *`
//! tail of an `authenticate()` call is delivered when the SDK future
//! resolves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wallet_sdk::{Scope, SdkError, WalletSdk};
use wallet_types::{
    AuthGrant, PaymentEvent, Session, SessionProvider, WalletAddress,
};

use crate::ports::store::SessionStore;

use super::errors::AuthError;
use super::state::AuthState;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Observer = Arc<dyn Fn(&AuthState) + Send + Sync>;

/// Single authority for "who is logged in".
pub struct AuthSessionManager {
    sdk: Arc<dyn WalletSdk>,
    store: Arc<dyn SessionStore>,
    state: RwLock<AuthState>,
    observers: Mutex<Vec<(SubscriberId, Observer)>>,
    next_subscriber: AtomicU64,
    /// Channel for re-feeding incomplete payments reported at
    /// authentication time into the payment dispatcher.
    incomplete_sink: Mutex<Option<mpsc::UnboundedSender<PaymentEvent>>>,
}

impl AuthSessionManager {
    /// Creates a manager in the `Uninitialized` state.
    pub fn new(sdk: Arc<dyn WalletSdk>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            sdk,
            store,
            state: RwLock::new(AuthState::Uninitialized),
            observers: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(1),
            incomplete_sink: Mutex::new(None),
        }
    }

    /// Wires the channel that incomplete payments from a prior process are
    /// re-delivered on (as `CompletionRequested` events).
    pub fn forward_incomplete_payments_to(&self, sender: mpsc::UnboundedSender<PaymentEvent>) {
        *self.incomplete_sink.lock() = Some(sender);
    }

    /// Registers an observer. Called synchronously on every transition.
    pub fn subscribe(&self, observer: impl Fn(&AuthState) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.observers.lock().retain(|(sub, _)| *sub != id);
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    /// Returns true iff a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.read().session().cloned()
    }

    /// Returns the active session's display handle, if any.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.state.read().session().map(|s| s.username.clone())
    }

    /// Returns the active session's bearer credential, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.read().session().map(|s| s.access_token.clone())
    }

    /// Restores a persisted session at process start.
    ///
    /// A structurally valid record moves straight to `Authenticated`
    /// without contacting the network (trust-on-first-use within the
    /// process lifetime). If the SDK is absent from the host environment
    /// the record is destroyed and the manager lands `Unauthenticated`.
    pub fn restore(&self) -> AuthState {
        self.transition(AuthState::Restoring);

        if !self.sdk.is_available() {
            if let Err(e) = self.store.clear_session() {
                warn!(error = %e, "failed to clear session while SDK unavailable");
            }
            return self.transition(AuthState::Unauthenticated {
                error: Some(AuthError::SdkUnavailable.to_string()),
            });
        }

        match self.store.load_session() {
            Ok(Some(session)) if session.validate().is_ok() => {
                info!(user_id = %session.user_id, "session restored from store");
                self.transition(AuthState::Authenticated(session))
            }
            Ok(Some(_)) | Ok(None) => self.transition(AuthState::Unauthenticated { error: None }),
            Err(e) => {
                warn!(error = %e, "session store unreadable at restore");
                self.transition(AuthState::Unauthenticated { error: None })
            }
        }
    }

    /// Runs the authentication handshake for the requested scopes.
    ///
    /// On success the session is persisted and the manager moves to
    /// `Authenticated`. On failure it moves to `Unauthenticated` with the
    /// error recorded; there is no automatic retry. Calling this while
    /// already `Authenticated` with the SDK unavailable leaves the active
    /// session intact.
    ///
    /// # Errors
    /// - `SdkUnavailable` if the SDK is absent
    /// - `AuthenticationFailed` for declined consent or transport errors
    pub async fn authenticate(&self, scopes: &[Scope]) -> Result<Session, AuthError> {
        if !self.sdk.is_available() {
            if self.is_authenticated() {
                // Fatal for this operation only; the prior state stays.
                return Err(AuthError::SdkUnavailable);
            }
            self.transition(AuthState::Unauthenticated {
                error: Some(AuthError::SdkUnavailable.to_string()),
            });
            return Err(AuthError::SdkUnavailable);
        }

        self.transition(AuthState::Authenticating);

        match self.sdk.authenticate(scopes).await {
            Ok(grant) => self.complete_authentication(grant),
            Err(err) => {
                let err = match err {
                    SdkError::Unavailable => AuthError::SdkUnavailable,
                    other => AuthError::AuthenticationFailed(other.to_string()),
                };
                self.transition(AuthState::Unauthenticated {
                    error: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    fn complete_authentication(&self, grant: AuthGrant) -> Result<Session, AuthError> {
        self.forward_incomplete(&grant);

        // A structurally invalid grant is a failed authentication like any
        // other: the machine must not stay in `Authenticating`.
        let session = match grant.into_session() {
            Ok(session) => session,
            Err(e) => {
                let err = AuthError::AuthenticationFailed(e.to_string());
                self.transition(AuthState::Unauthenticated {
                    error: Some(err.to_string()),
                });
                return Err(err);
            }
        };

        // Persistence failure does not invalidate the in-memory session;
        // the next restore simply finds nothing.
        if let Err(e) = self.store.save_session(&session) {
            warn!(error = %e, "failed to persist session");
        }

        info!(user_id = %session.user_id, "authenticated");
        self.transition(AuthState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Re-feeds incomplete payments into the payment dispatcher.
    fn forward_incomplete(&self, grant: &AuthGrant) {
        let sink = self.incomplete_sink.lock();
        for incomplete in &grant.incomplete_payments {
            match (&*sink, &incomplete.txid) {
                (Some(sender), Some(txid)) => {
                    debug!(payment_id = %incomplete.payment_id, "re-dispatching incomplete payment");
                    let _ = sender.send(PaymentEvent::CompletionRequested {
                        payment_id: incomplete.payment_id.clone(),
                        txid: txid.clone(),
                    });
                }
                (Some(_), None) => {
                    // Without a txid there is nothing to complete server-side.
                    warn!(payment_id = %incomplete.payment_id, "incomplete payment without txid, dropped");
                }
                (None, _) => {
                    warn!(payment_id = %incomplete.payment_id, "incomplete payment reported but no dispatcher wired");
                }
            }
        }
    }

    /// Clears the persisted session and moves to `Unauthenticated`,
    /// unconditionally and from any state.
    pub async fn sign_out(&self) {
        if let Err(e) = self.sdk.sign_out().await {
            warn!(error = %e, "SDK sign-out failed, clearing local session anyway");
        }
        if let Err(e) = self.store.clear_session() {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.transition(AuthState::Unauthenticated { error: None });
    }

    /// Validates and persists a user-supplied receiving address.
    ///
    /// # Errors
    /// - `InvalidAddress` if the format rule fails
    /// - `Store` if persistence fails
    pub fn set_user_wallet_address(&self, raw: &str) -> Result<WalletAddress, AuthError> {
        let address = WalletAddress::parse(raw)?;
        self.store.save_wallet_address(&address)?;
        Ok(address)
    }

    /// Applies the new state and notifies every observer before returning.
    fn transition(&self, next: AuthState) -> AuthState {
        {
            let mut state = self.state.write();
            debug!(from = state.label(), to = next.label(), "auth state transition");
            *state = next.clone();
        }
        // Snapshot before invoking so a callback may subscribe or
        // unsubscribe without deadlocking on the list.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(&next);
        }
        next
    }
}

impl SessionProvider for AuthSessionManager {
    fn current_session(&self) -> Option<Session> {
        self.session()
    }

    fn user_wallet_address(&self) -> Option<WalletAddress> {
        match self.store.load_wallet_address() {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, "failed to load wallet address");
                None
            }
        }
    }
}
