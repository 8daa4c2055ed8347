//! Payment error types.
//!
//! Errors occurring before the SDK accepts a request are returned
//! synchronously from `create_payment`. Errors after acceptance are never
//! thrown; they are observable only through registry state.

use wallet_sdk::SdkError;
use wallet_types::{PaymentId, MAX_MEMO_LEN};

/// Payment subsystem error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    /// Payment attempted without a valid session. Never silently
    /// authenticates on the caller's behalf.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Amount must be positive and finite.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    /// Memo exceeds the bounded length.
    #[error("memo exceeds {MAX_MEMO_LEN} bytes")]
    MemoTooLong,

    /// A receiving address failed authoritative validation.
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    /// The SDK handed back an identifier already in the registry.
    #[error("payment {0} already registered")]
    DuplicatePayment(PaymentId),

    /// The wallet SDK is not present in the host environment.
    #[error("wallet SDK is not available")]
    SdkUnavailable,

    /// The SDK rejected the request before accepting it locally.
    #[error(transparent)]
    Sdk(#[from] SdkError),
}
