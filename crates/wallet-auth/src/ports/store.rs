//! Durable session store port.
//!
//! Persists the session record and the user-supplied wallet address under
//! two distinct durable keys. The original system additionally wrote the
//! bare access token under its own key; that duplicate was collapsed into
//! the session record, which is now the single source of truth.
//!
//! Missing or corrupt entries load as `None`, never as an error that could
//! take the process down; `Err` is reserved for I/O failures.

use wallet_types::{Session, WalletAddress};

/// Store-level failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed (filesystem, quota, permissions).
    #[error("session store I/O failure: {0}")]
    Io(String),

    /// The session record could not be serialized.
    #[error("session store serialization failure: {0}")]
    Serialization(String),
}

/// Durable key-value persistence for authentication state.
///
/// Write on every successful authentication; read once at process start;
/// delete on sign-out.
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session, if present and readable.
    ///
    /// A corrupt record is treated as "no session" (logged by the adapter),
    /// not an error.
    fn load_session(&self) -> Result<Option<Session>, StoreError>;

    /// Persists the session record, replacing any previous one.
    fn save_session(&self, session: &Session) -> Result<(), StoreError>;

    /// Removes the session record. Removing an absent record is a no-op.
    fn clear_session(&self) -> Result<(), StoreError>;

    /// Loads the user-supplied wallet address, if present and valid.
    fn load_wallet_address(&self) -> Result<Option<WalletAddress>, StoreError>;

    /// Persists the user-supplied wallet address.
    fn save_wallet_address(&self, address: &WalletAddress) -> Result<(), StoreError>;
}
