//! Ports for the payment subsystem.

pub mod outbound;

pub use outbound::{GatewayError, PaymentGateway};
