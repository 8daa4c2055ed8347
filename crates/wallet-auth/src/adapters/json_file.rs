//! JSON-file session store.
//!
//! One file per durable key under a data directory:
//!
//! - `session.json` - the JSON-encoded session record
//! - `wallet_address` - the raw user-supplied receiving address
//!
//! Corrupt or unreadable entries load as `None` with a `warn!`; they are
//! overwritten by the next save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;
use wallet_types::{Session, WalletAddress};

use crate::ports::store::{SessionStore, StoreError};

const SESSION_FILE: &str = "session.json";
const WALLET_ADDRESS_FILE: &str = "wallet_address";

/// Filesystem-backed session store.
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    ///
    /// # Errors
    /// Fails if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Reads a file, mapping "not found" to `None` and propagating other
    /// I/O failures.
    fn read_entry(path: &Path) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn remove_entry(path: &Path) -> Result<(), StoreError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load_session(&self) -> Result<Option<Session>, StoreError> {
        let path = self.path(SESSION_FILE);
        let Some(contents) = Self::read_entry(&path)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt session record, treating as no session");
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        let contents = serde_json::to_string(session)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(self.path(SESSION_FILE), contents).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn clear_session(&self) -> Result<(), StoreError> {
        Self::remove_entry(&self.path(SESSION_FILE))
    }

    fn load_wallet_address(&self) -> Result<Option<WalletAddress>, StoreError> {
        let path = self.path(WALLET_ADDRESS_FILE);
        let Some(raw) = Self::read_entry(&path)? else {
            return Ok(None);
        };
        match WalletAddress::parse(raw.trim()) {
            Ok(address) => Ok(Some(address)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "stored wallet address is invalid, ignoring");
                Ok(None)
            }
        }
    }

    fn save_wallet_address(&self, address: &WalletAddress) -> Result<(), StoreError> {
        fs::write(self.path(WALLET_ADDRESS_FILE), address.as_str())
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}
