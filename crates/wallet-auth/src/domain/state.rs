//! Authentication state machine states.

use wallet_types::Session;

/// State of the authentication state machine.
///
/// ```text
/// Uninitialized ──restore()──→ Restoring ──→ {Authenticated, Unauthenticated}
/// Unauthenticated ──authenticate()──→ Authenticating
/// Authenticating ──→ {Authenticated, Unauthenticated(error)}
/// any ──sign_out()──→ Unauthenticated
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Process started; restore has not run yet.
    #[default]
    Uninitialized,
    /// Reading the durable store.
    Restoring,
    /// Authentication handshake in flight.
    Authenticating,
    /// A structurally valid session is active.
    Authenticated(Session),
    /// No session; `error` records why the last attempt failed, if any.
    Unauthenticated {
        /// Message from the last failed attempt, or `None` after a clean
        /// sign-out or empty restore.
        error: Option<String>,
    },
}

impl AuthState {
    /// Returns true iff a session with a non-empty access token is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Short label for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Restoring => "restoring",
            Self::Authenticating => "authenticating",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated { .. } => "unauthenticated",
        }
    }
}
