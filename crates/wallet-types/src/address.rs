//! Wallet address validation.
//!
//! A receiving address on the wallet network is a 56-character string whose
//! first character is the account-prefix `'G'`. Validation is pure: no I/O,
//! no network lookups. The consuming UI validates on every keystroke; the
//! orchestrator re-validates authoritatively before an address is placed
//! into payment metadata.

use serde::{Deserialize, Serialize};

/// Required length of a wallet address.
pub const ADDRESS_LEN: usize = 56;

/// Account-prefix character every valid address starts with.
pub const ACCOUNT_PREFIX: char = 'G';

/// Returns true iff `address` is exactly 56 characters and starts with `'G'`.
#[must_use]
pub fn is_valid(address: &str) -> bool {
    address.len() == ADDRESS_LEN && address.starts_with(ACCOUNT_PREFIX)
}

/// Address validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Address length is not exactly 56 characters.
    #[error("address must be {ADDRESS_LEN} characters, got {0}")]
    BadLength(usize),

    /// Address does not start with the account-prefix character.
    #[error("address must start with '{ACCOUNT_PREFIX}'")]
    BadPrefix,
}

/// A validated wallet address.
///
/// Construction is only possible through [`WalletAddress::parse`], so holding
/// a value of this type implies the format rule already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parses and validates a raw address string.
    ///
    /// # Errors
    /// - `BadLength` if the string is not exactly 56 characters
    /// - `BadPrefix` if it does not start with `'G'`
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let raw = raw.into();
        if raw.len() != ADDRESS_LEN {
            return Err(AddressError::BadLength(raw.len()));
        }
        if !raw.starts_with(ACCOUNT_PREFIX) {
            return Err(AddressError::BadPrefix);
        }
        Ok(Self(raw))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}
