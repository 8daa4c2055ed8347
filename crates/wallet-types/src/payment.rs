//! Payment entity and protocol state machine.
//!
//! One [`Payment`] tracks a single four-phase transfer from local creation
//! to a terminal outcome:
//!
//! ```text
//! pending ──(approval-ready)──→ pending      [side effect: Approval Gateway]
//! pending ──(cancel)─────────→ cancelled     [terminal]
//! pending ──(error)──────────→ failed        [terminal]
//! pending ──(completion-ready, txid)──→ approved   [side effect: Completion Gateway]
//! approved ──(gateway success)──→ completed  [terminal]
//! approved ──(error)─────────→ failed        [terminal]
//! ```
//!
//! INVARIANT-1: `payment_id` is immutable once assigned by the SDK.
//! INVARIANT-2: terminal records (`completed|cancelled|failed`) never mutate.
//! INVARIANT-3: `txid` is present from the `approved` state onward and is
//! attached before the Completion Gateway call, so a crash between the two
//! still leaves a recoverable record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maximum accepted memo length in bytes.
pub const MAX_MEMO_LEN: usize = 280;

/// Unique payment identifier assigned by the wallet SDK.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub String);

impl PaymentId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaymentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Transaction identifier assigned once the network accepts the transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub String);

impl TxId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Payment protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Accepted locally by the SDK, awaiting server-side milestones.
    #[default]
    Pending,
    /// Network accepted the transfer; `txid` is attached.
    Approved,
    /// Completion acknowledged by the gateway. Terminal.
    Completed,
    /// Cancelled by the user through the SDK. Terminal.
    Cancelled,
    /// SDK error or definitive gateway failure. Terminal.
    Failed,
}

impl PaymentStatus {
    /// Returns true for `completed`, `cancelled`, and `failed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// Caller-supplied payment parameters.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequest {
    /// Positive quantity in the network's native unit.
    pub amount: f64,
    /// Free-text description, opaque to the protocol.
    pub memo: String,
    /// Arbitrary key/value context attached by the caller.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl PaymentRequest {
    /// Creates a request with empty metadata.
    #[must_use]
    pub fn new(amount: f64, memo: impl Into<String>) -> Self {
        Self {
            amount,
            memo: memo.into(),
            metadata: HashMap::new(),
        }
    }
}

/// A payment tracked by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// SDK-assigned identifier, immutable once set.
    pub payment_id: PaymentId,
    /// Quantity in the network's native unit (> 0).
    pub amount: f64,
    /// Free-text description.
    pub memo: String,
    /// Caller context plus the resolved receiving address.
    pub metadata: HashMap<String, serde_json::Value>,
    /// Set on the approved edge, never cleared afterwards.
    pub txid: Option<TxId>,
    /// Current protocol state.
    pub status: PaymentStatus,
}

impl Payment {
    /// Creates a pending payment from an accepted request.
    #[must_use]
    pub fn pending(
        payment_id: PaymentId,
        amount: f64,
        memo: String,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            payment_id,
            amount,
            memo,
            metadata,
            txid: None,
            status: PaymentStatus::Pending,
        }
    }

    /// Returns true if no further transitions are permitted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Approved.is_terminal());
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_pending_payment_has_no_txid() {
        let payment = Payment::pending(
            PaymentId::from("p1"),
            5.0,
            "tip".to_string(),
            HashMap::new(),
        );
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.txid.is_none());
        assert!(!payment.is_terminal());
    }

    #[test]
    fn test_payment_serde_round_trip() {
        let mut metadata = HashMap::new();
        metadata.insert("purpose".to_string(), serde_json::json!("tip"));
        let payment = Payment::pending(PaymentId::from("p1"), 2.5, "hi".to_string(), metadata);
        let json = serde_json::to_string(&payment).unwrap();
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(payment, back);
    }
}
