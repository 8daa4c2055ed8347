//! # Shared Types - Wallet Core Domain Types
//!
//! Domain types shared by every crate in the workspace: sessions, payments,
//! wallet addresses, protocol events, and configuration.
//!
//! ## Ownership Rules
//!
//! - `Payment` records are owned exclusively by the `PaymentRegistry` in
//!   `wallet-payments`; everything else holds clones.
//! - A `Session` value existing implies an authenticated identity; the
//!   constructor rejects structurally invalid sessions.
//! - A `WalletAddress` value existing implies it passed format validation;
//!   raw strings never flow into payment metadata.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod address;
pub mod config;
pub mod events;
pub mod payment;
pub mod session;
pub mod traits;

pub use address::{is_valid, AddressError, WalletAddress, ACCOUNT_PREFIX, ADDRESS_LEN};
pub use config::{ConfigError, GatewayConfig, WalletConfig};
pub use events::PaymentEvent;
pub use payment::{Payment, PaymentId, PaymentRequest, PaymentStatus, TxId, MAX_MEMO_LEN};
pub use session::{AuthGrant, IncompletePayment, Session, SessionError};
pub use traits::SessionProvider;
