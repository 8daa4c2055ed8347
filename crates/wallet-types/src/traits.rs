//! Shared ports between subsystems.
//!
//! Direct calls between the auth and payment crates are forbidden; the
//! payments crate observes authentication state only through this trait,
//! which the auth crate's session manager implements.

use crate::address::WalletAddress;
use crate::session::Session;

/// Read-only view of the current authentication state.
pub trait SessionProvider: Send + Sync {
    /// Returns the active session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Returns the user-supplied receiving address, if one was validated
    /// and persisted.
    fn user_wallet_address(&self) -> Option<WalletAddress>;
}
