//! # Wallet SDK Port
//!
//! The only seam between this workspace and the external wallet-network SDK.
//! The auth and payment crates are the sole consumers; neither ever talks to
//! the SDK surface directly.
//!
//! ## Pieces
//!
//! - [`WalletSdk`] - the async port every transport implements
//! - [`BridgeTransport`] - wraps a real transport and, only in an explicit
//!   opt-in test-double mode, substitutes a placeholder identity when the
//!   cross-origin messaging handshake cannot complete
//! - [`StubWalletSdk`] - scriptable test double for driving the protocol
//!   without the real network
//!
//! ## Event Delivery
//!
//! Payment milestones arrive as `wallet_types::PaymentEvent`s over a
//! `tokio::sync::mpsc` channel owned by the orchestrator; the transport
//! holds the sending half.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod port;
pub mod stub;
pub mod transport;

pub use port::{Scope, SdkError, SdkPaymentData, WalletSdk};
pub use stub::StubWalletSdk;
pub use transport::{BridgeTransport, TransportMode};
