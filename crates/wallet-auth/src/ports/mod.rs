//! Ports for the authentication subsystem.

pub mod store;

pub use store::{SessionStore, StoreError};
