//! # LumenPay Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate choreography
//!     ├── flows.rs          # Full payment lifecycles, Scenarios A-E
//!     └── session_restore.rs# Auth restore / sign-out across restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wallet-tests
//!
//! # By category
//! cargo test -p wallet-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
