//! # Authentication Subsystem
//!
//! Single authority for "who is logged in". The session manager owns the
//! authentication state machine, is the only component permitted to call
//! the SDK's authenticate/sign-out primitives, and publishes every state
//! transition synchronously to its subscribers.
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──restore()──→ Restoring ──→ {Authenticated, Unauthenticated}
//! Unauthenticated ──authenticate()──→ Authenticating ──→ {Authenticated,
//!                                                         Unauthenticated(error)}
//! any state ──sign_out()──→ Unauthenticated
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! adapters/ - session store implementations (in-memory, JSON file)
//! ports/    - SessionStore trait
//! domain/   - AuthState, AuthSessionManager, errors
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemorySessionStore, JsonFileSessionStore};
pub use domain::{AuthError, AuthSessionManager, AuthState, SubscriberId};
pub use ports::{SessionStore, StoreError};
