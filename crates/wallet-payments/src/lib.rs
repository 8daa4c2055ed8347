//! # Payment Subsystem
//!
//! Drives a single payment through the four-edge transfer protocol and
//! keeps the registry consistent with the SDK's event stream.
//!
//! ## Protocol State Machine
//!
//! ```text
//! pending ──(ApprovalRequested)──→ pending    [side effect: Approval Gateway]
//! pending ──(Cancelled)──────────→ cancelled  [terminal]
//! pending ──(Errored)────────────→ failed     [terminal]
//! pending ──(CompletionRequested, txid)──→ approved  [side effect: Completion Gateway]
//! approved ──(gateway success)───→ completed  [terminal]
//! approved ──(Errored)───────────→ failed     [terminal]
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Status changes only along the edges above | `registry.rs` transition methods |
//! | INVARIANT-2 | Terminal records never mutate | `registry.rs` terminal guards |
//! | INVARIANT-3 | Duplicate terminal events are no-ops | `Transition::Ignored` paths |
//! | INVARIANT-4 | `txid` attached before the Completion Gateway call | `orchestrator.rs` dispatch order |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! adapters/ - HTTP gateway client (reqwest)
//! ports/    - PaymentGateway trait
//! domain/   - PaymentRegistry, PaymentOrchestrator, errors
//! ```
//!
//! ## Known Limitations
//!
//! There is no caller-initiated abort; cancellation is signaled exclusively
//! by the SDK's cancel milestone.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::HttpPaymentGateway;
pub use domain::{PaymentError, PaymentOrchestrator, PaymentRegistry, Transition};
pub use ports::{GatewayError, PaymentGateway};
