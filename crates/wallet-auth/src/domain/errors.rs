//! Authentication error types.

use wallet_types::AddressError;

use crate::ports::store::StoreError;

/// Authentication subsystem error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The wallet SDK is not present in the host environment. Fatal for
    /// the current operation only; never retried automatically.
    #[error("wallet SDK is not available")]
    SdkUnavailable,

    /// The handshake ran and failed (declined consent, transport error).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A user-supplied wallet address failed validation.
    #[error("invalid wallet address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The durable store failed at the I/O level.
    #[error(transparent)]
    Store(#[from] StoreError),
}
