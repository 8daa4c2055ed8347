//! Bridge transport with mode-gated cross-origin fallback.
//!
//! When the hosting page's origin does not match the SDK's origin (a
//! development-time-only condition), the authentication handshake fails
//! with the cross-origin messaging error class. The original system
//! silently substituted a fake identity on that path from production code;
//! here the substitution is reachable only when the caller explicitly
//! constructs the transport in [`TransportMode::TestDouble`].

use async_trait::async_trait;
use tracing::warn;
use wallet_types::{AuthGrant, PaymentId};

use crate::port::{Scope, SdkError, SdkPaymentData, WalletSdk};

/// Transport behavior on cross-origin messaging failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// All errors pass through untouched. The only mode for production
    /// builds.
    #[default]
    Production,
    /// Substitute a labeled placeholder identity when authentication fails
    /// with `SdkError::CrossOriginMessaging`. Development only; must be
    /// selected explicitly at construction.
    TestDouble,
}

/// Wraps an inner SDK transport, isolating callers from cross-origin
/// messaging failures during local development.
pub struct BridgeTransport<S> {
    inner: S,
    mode: TransportMode,
}

impl<S: WalletSdk> BridgeTransport<S> {
    /// Production transport: every error passes through.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            mode: TransportMode::Production,
        }
    }

    /// Transport with an explicit mode. `TestDouble` must never be wired
    /// into a production build path.
    pub fn with_mode(inner: S, mode: TransportMode) -> Self {
        Self { inner, mode }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> TransportMode {
        self.mode
    }
}

#[async_trait]
impl<S: WalletSdk> WalletSdk for BridgeTransport<S> {
    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    async fn authenticate(&self, scopes: &[Scope]) -> Result<AuthGrant, SdkError> {
        match self.inner.authenticate(scopes).await {
            Ok(grant) => Ok(grant),
            Err(SdkError::CrossOriginMessaging(detail))
                if self.mode == TransportMode::TestDouble =>
            {
                warn!(
                    detail = %detail,
                    "cross-origin handshake failed; substituting test-double identity"
                );
                Ok(AuthGrant::test_double())
            }
            Err(err) => Err(err),
        }
    }

    async fn submit_payment(&self, data: &SdkPaymentData) -> Result<PaymentId, SdkError> {
        // Payment submission never gets a fallback; only the authentication
        // handshake is subject to the cross-origin condition.
        self.inner.submit_payment(data).await
    }

    async fn sign_out(&self) -> Result<(), SdkError> {
        self.inner.sign_out().await
    }
}
