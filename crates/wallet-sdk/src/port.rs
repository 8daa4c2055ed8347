//! The `WalletSdk` port.
//!
//! Mirrors the surface this core consumes from the external SDK:
//! `authenticate(scopes)`, `createPayment(paymentData, callbacks)`, and
//! `signOut()`. Callbacks are replaced by the typed event channel; the
//! four milestone callbacks map onto the `PaymentEvent` variants.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wallet_types::{AuthGrant, PaymentId};

/// Capability scopes requested at authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Permission to create payments on the user's behalf.
    Payments,
    /// Permission to read the user's display handle.
    Username,
    /// Permission to read the user's wallet address.
    WalletAddress,
}

impl Scope {
    /// Wire name of the scope as the SDK expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payments => "payments",
            Self::Username => "username",
            Self::WalletAddress => "wallet_address",
        }
    }
}

/// Errors from the SDK surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// The wallet SDK is not present in the host environment.
    #[error("wallet SDK is not available in this environment")]
    Unavailable,

    /// Cross-origin messaging to the SDK's origin failed. Occurs only
    /// during local development when origins do not match.
    #[error("cross-origin messaging failure: {0}")]
    CrossOriginMessaging(String),

    /// The user declined the consent dialog.
    #[error("user declined consent")]
    ConsentDeclined,

    /// The SDK rejected the request before accepting it locally.
    #[error("SDK rejected request: {0}")]
    Rejected(String),

    /// Any other transport-level failure.
    #[error("SDK transport error: {0}")]
    Transport(String),
}

/// Payment parameters in the shape the SDK's creation primitive expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkPaymentData {
    /// Quantity in the network's native unit.
    pub amount: f64,
    /// Free-text description.
    pub memo: String,
    /// Caller context including the resolved receiving address.
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Async port onto the external wallet-network SDK.
///
/// Implementations must be safe to share across runtime threads; the SDK
/// bridge may dispatch from any of them.
#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// Returns false when the SDK object is absent from the host
    /// environment. Checked at restore time and before every operation.
    fn is_available(&self) -> bool;

    /// Runs the authentication handshake for the requested scopes.
    ///
    /// # Errors
    /// - `Unavailable` if the SDK is not present
    /// - `ConsentDeclined` if the user rejects the dialog
    /// - `CrossOriginMessaging` / `Transport` on handshake failures
    async fn authenticate(&self, scopes: &[Scope]) -> Result<AuthGrant, SdkError>;

    /// Submits a payment for local acceptance.
    ///
    /// Returns the SDK-assigned payment identifier once the request is
    /// accepted locally (pre-approval). Later milestones arrive as events;
    /// errors after acceptance are delivered only through the `Errored`
    /// event, never through this return value.
    async fn submit_payment(&self, data: &SdkPaymentData) -> Result<PaymentId, SdkError>;

    /// Tears down the SDK-side session.
    async fn sign_out(&self) -> Result<(), SdkError>;
}
