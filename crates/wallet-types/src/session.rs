//! Authentication session types.
//!
//! A [`Session`] is the locally held proof of a successful authentication
//! against the wallet network. It is created from an [`AuthGrant`] returned
//! by the SDK, persisted immediately, and restored at process start if
//! structurally valid.
//!
//! INVARIANT: a `Session` value exists only with non-empty `user_id` and
//! `access_token`; `is_authenticated` is derived from the session's
//! existence, never from a separate flag.

use serde::{Deserialize, Serialize};

/// Structural validation error for session records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The user identifier is empty.
    #[error("session user_id must not be empty")]
    EmptyUserId,

    /// The access token is empty.
    #[error("session access_token must not be empty")]
    EmptyAccessToken,
}

/// A locally held authentication session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier from the wallet network, unique per identity.
    pub user_id: String,
    /// Display handle; may be empty.
    pub username: String,
    /// Opaque bearer credential required for payment operations.
    pub access_token: String,
}

impl Session {
    /// Creates a structurally valid session.
    ///
    /// # Errors
    /// Rejects empty `user_id` or `access_token`.
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let session = Self {
            user_id: user_id.into(),
            username: username.into(),
            access_token: access_token.into(),
        };
        session.validate()?;
        Ok(session)
    }

    /// Re-checks the structural rule on a deserialized record.
    ///
    /// Used at restore time: records read back from the durable store are
    /// untrusted until this passes.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.user_id.is_empty() {
            return Err(SessionError::EmptyUserId);
        }
        if self.access_token.is_empty() {
            return Err(SessionError::EmptyAccessToken);
        }
        Ok(())
    }
}

/// A payment left dangling by a previous process, reported by the SDK at
/// authentication time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompletePayment {
    /// Identifier of the dangling payment.
    pub payment_id: crate::payment::PaymentId,
    /// Transaction identifier, present if the transfer already reached the
    /// network before the previous process died.
    pub txid: Option<crate::payment::TxId>,
}

/// Result of a successful SDK authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    /// Opaque identifier from the wallet network.
    pub user_id: String,
    /// Display handle; may be empty.
    pub username: String,
    /// Opaque bearer credential.
    pub access_token: String,
    /// Payments the SDK reports as incomplete from a prior session.
    #[serde(default)]
    pub incomplete_payments: Vec<IncompletePayment>,
}

impl AuthGrant {
    /// Converts the grant into a session record.
    ///
    /// # Errors
    /// Fails if the grant is structurally invalid (empty id or token).
    pub fn into_session(self) -> Result<Session, SessionError> {
        Session::new(self.user_id, self.username, self.access_token)
    }

    /// A clearly-labeled non-production placeholder identity.
    ///
    /// Only ever returned by the bridge transport in test-double mode; must
    /// never be reachable from a production transport.
    #[must_use]
    pub fn test_double() -> Self {
        Self {
            user_id: "test-double-user".to_string(),
            username: "test-double".to_string(),
            access_token: "test-double-token".to_string(),
            incomplete_payments: Vec::new(),
        }
    }
}
