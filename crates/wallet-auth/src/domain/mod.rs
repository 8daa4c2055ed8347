//! Core domain for the authentication subsystem.

pub mod errors;
pub mod manager;
pub mod state;

pub use errors::AuthError;
pub use manager::{AuthSessionManager, SubscriberId};
pub use state::AuthState;
