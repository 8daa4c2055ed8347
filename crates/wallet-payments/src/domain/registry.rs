//! Payment registry.
//!
//! The single source of truth for in-flight payments. Every status change
//! goes through a transition method here; callers never hold a mutable
//! payment. A mutex serializes all mutation because SDK bridge callbacks
//! may be dispatched from any runtime thread.
//!
//! Transitions are idempotent at the target state: duplicate delivery of
//! an already-applied edge leaves the record unchanged and reports
//! [`Transition::Ignored`]. Terminal records (`completed`, `cancelled`,
//! `failed`) never mutate.

use std::collections::HashMap;

use parking_lot::Mutex;
use wallet_types::{Payment, PaymentId, PaymentStatus, TxId};

use super::errors::PaymentError;

/// Outcome of a registry transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The edge was applied and the record changed.
    Applied,
    /// Duplicate delivery of an already-applied edge; record unchanged.
    Ignored,
    /// The edge is not legal from the current state; record unchanged.
    Rejected,
    /// No payment with this identifier.
    Unknown,
}

/// In-memory map from payment identifier to payment record.
#[derive(Default)]
pub struct PaymentRegistry {
    payments: Mutex<HashMap<PaymentId, Payment>>,
}

impl PaymentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly accepted payment in the `pending` state.
    ///
    /// # Errors
    /// `DuplicatePayment` if the identifier is already registered; one
    /// active orchestration per identifier is the registry's core
    /// guarantee.
    pub fn insert_pending(&self, payment: Payment) -> Result<(), PaymentError> {
        let mut payments = self.payments.lock();
        if payments.contains_key(&payment.payment_id) {
            return Err(PaymentError::DuplicatePayment(payment.payment_id));
        }
        payments.insert(payment.payment_id.clone(), payment);
        Ok(())
    }

    /// `pending -> approved`, attaching the txid.
    ///
    /// Re-delivery with the same txid is `Ignored`; a conflicting txid or
    /// any other current state is `Rejected`.
    pub fn mark_approved(&self, id: &PaymentId, txid: &TxId) -> Transition {
        let mut payments = self.payments.lock();
        let Some(payment) = payments.get_mut(id) else {
            return Transition::Unknown;
        };
        match payment.status {
            PaymentStatus::Pending => {
                payment.txid = Some(txid.clone());
                payment.status = PaymentStatus::Approved;
                Transition::Applied
            }
            PaymentStatus::Approved if payment.txid.as_ref() == Some(txid) => Transition::Ignored,
            _ => Transition::Rejected,
        }
    }

    /// `approved -> completed`. Only legal from `approved`; in particular
    /// `pending -> completed` is a rejected jump.
    pub fn mark_completed(&self, id: &PaymentId) -> Transition {
        let mut payments = self.payments.lock();
        let Some(payment) = payments.get_mut(id) else {
            return Transition::Unknown;
        };
        match payment.status {
            PaymentStatus::Approved => {
                payment.status = PaymentStatus::Completed;
                Transition::Applied
            }
            PaymentStatus::Completed => Transition::Ignored,
            _ => Transition::Rejected,
        }
    }

    /// Any non-terminal state `-> cancelled`. Idempotent on terminal
    /// records.
    pub fn mark_cancelled(&self, id: &PaymentId) -> Transition {
        self.terminate(id, PaymentStatus::Cancelled)
    }

    /// Any non-terminal state `-> failed`. Idempotent on terminal records.
    pub fn mark_failed(&self, id: &PaymentId) -> Transition {
        self.terminate(id, PaymentStatus::Failed)
    }

    fn terminate(&self, id: &PaymentId, terminal: PaymentStatus) -> Transition {
        let mut payments = self.payments.lock();
        let Some(payment) = payments.get_mut(id) else {
            return Transition::Unknown;
        };
        if payment.status.is_terminal() {
            return Transition::Ignored;
        }
        payment.status = terminal;
        Transition::Applied
    }

    /// Pure lookup; returns a clone, never a handle into the map.
    #[must_use]
    pub fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.payments.lock().get(id).cloned()
    }

    /// Sweeps every terminal record; the only cleanup mechanism. Returns
    /// the number of records removed.
    pub fn clear_terminal(&self) -> usize {
        let mut payments = self.payments.lock();
        let before = payments.len();
        payments.retain(|_, payment| !payment.status.is_terminal());
        before - payments.len()
    }

    /// Number of registered payments, terminal included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payments.lock().len()
    }

    /// Number of records still awaiting their first milestone.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.payments
            .lock()
            .values()
            .filter(|payment| payment.status == PaymentStatus::Pending)
            .count()
    }

    /// Returns true if no payments are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payments.lock().is_empty()
    }
}
