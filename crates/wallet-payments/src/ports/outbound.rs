//! Outbound (driven) ports for the payment subsystem.
//!
//! The Approval and Completion Gateways are the two outbound calls this
//! core makes to its own backend to acknowledge SDK-driven milestones.
//! Their failures never propagate to the caller that created the payment;
//! the dispatcher logs them and, for a definitive completion failure,
//! moves the payment to `failed`.

use async_trait::async_trait;
use wallet_types::{PaymentId, TxId};

/// Gateway call failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Connection-level failure (DNS, refused, TLS).
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("gateway returned status {0}")]
    Status(u16),

    /// The request exceeded the configured timeout.
    #[error("gateway call timed out")]
    Timeout,
}

/// The two backend acknowledgement calls of the payment protocol.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Acknowledges that a payment is ready for server-side approval.
    ///
    /// # Errors
    /// Transport, status, or timeout failures after exhausting the
    /// adapter's configured retries.
    async fn approve(&self, payment_id: &PaymentId) -> Result<(), GatewayError>;

    /// Acknowledges that a payment is ready for server-side completion.
    ///
    /// # Errors
    /// Same classes as [`PaymentGateway::approve`].
    async fn complete(&self, payment_id: &PaymentId, txid: &TxId) -> Result<(), GatewayError>;
}
