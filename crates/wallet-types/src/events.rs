//! Payment protocol events.
//!
//! The external SDK delivers payment milestones as callbacks; the bridge
//! maps each callback onto this closed set of events, and a single
//! dispatcher in the orchestrator maps each event onto a registry
//! transition. The state machine is therefore exercised identically whether
//! driven by the real SDK or by a test double.

use serde::{Deserialize, Serialize};

use crate::payment::{PaymentId, TxId};

/// One milestone in the payment protocol, as delivered by the SDK bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentEvent {
    /// The payment is ready for server-side approval. Does not change the
    /// payment's status; only triggers the Approval Gateway call.
    ApprovalRequested {
        /// The payment this milestone applies to.
        payment_id: PaymentId,
    },

    /// The network accepted the transfer; the payment moves to `approved`
    /// and the Completion Gateway is called.
    CompletionRequested {
        /// The payment this milestone applies to.
        payment_id: PaymentId,
        /// Network-assigned transaction identifier.
        txid: TxId,
    },

    /// The user cancelled the payment through the SDK. Terminal.
    Cancelled {
        /// The payment this milestone applies to.
        payment_id: PaymentId,
    },

    /// The SDK reported a protocol error. Terminal.
    Errored {
        /// The payment this milestone applies to.
        payment_id: PaymentId,
        /// SDK-supplied error description.
        message: String,
    },
}

impl PaymentEvent {
    /// Returns the payment identifier the event applies to.
    #[must_use]
    pub fn payment_id(&self) -> &PaymentId {
        match self {
            Self::ApprovalRequested { payment_id }
            | Self::CompletionRequested { payment_id, .. }
            | Self::Cancelled { payment_id }
            | Self::Errored { payment_id, .. } => payment_id,
        }
    }

    /// Returns true for events that move the payment to a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::Errored { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_id_accessor() {
        let event = PaymentEvent::CompletionRequested {
            payment_id: PaymentId::from("p1"),
            txid: TxId::from("tx1"),
        };
        assert_eq!(event.payment_id().as_str(), "p1");
    }

    #[test]
    fn test_terminal_classification() {
        let id = PaymentId::from("p1");
        assert!(!PaymentEvent::ApprovalRequested {
            payment_id: id.clone()
        }
        .is_terminal());
        assert!(PaymentEvent::Cancelled {
            payment_id: id.clone()
        }
        .is_terminal());
        assert!(PaymentEvent::Errored {
            payment_id: id,
            message: "boom".to_string()
        }
        .is_terminal());
    }
}
