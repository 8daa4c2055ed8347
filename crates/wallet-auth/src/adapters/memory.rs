//! In-memory session store.
//!
//! Used by tests and by hosts without durable storage. Contents do not
//! survive the process.

use parking_lot::RwLock;
use wallet_types::{Session, WalletAddress};

use crate::ports::store::{SessionStore, StoreError};

/// Volatile session store.
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
    wallet_address: RwLock<Option<WalletAddress>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a session, as if a previous process
    /// had authenticated.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        *store.session.write() = Some(session);
        store
    }
}

impl SessionStore for InMemorySessionStore {
    fn load_session(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.session.read().clone())
    }

    fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        *self.session.write() = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> Result<(), StoreError> {
        *self.session.write() = None;
        Ok(())
    }

    fn load_wallet_address(&self) -> Result<Option<WalletAddress>, StoreError> {
        Ok(self.wallet_address.read().clone())
    }

    fn save_wallet_address(&self, address: &WalletAddress) -> Result<(), StoreError> {
        *self.wallet_address.write() = Some(address.clone());
        Ok(())
    }
}
