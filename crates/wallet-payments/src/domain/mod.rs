//! Core domain for the payment subsystem.

pub mod errors;
pub mod orchestrator;
pub mod registry;

pub use errors::PaymentError;
pub use orchestrator::PaymentOrchestrator;
pub use registry::{PaymentRegistry, Transition};
