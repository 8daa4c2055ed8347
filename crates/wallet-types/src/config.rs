//! # Wallet Core Configuration
//!
//! Unified configuration for the auth and payment subsystems, read once at
//! startup. All timeouts and limits have sane defaults with environment
//! override capability.
//!
//! ## Environment Variables
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `LUMENPAY_PLATFORM_WALLET` | Platform-level settlement address |
//! | `LUMENPAY_API_BASE_URL` | Base URL for the approval/completion gateways |
//! | `LUMENPAY_GATEWAY_TIMEOUT_MS` | Per-request gateway timeout |
//! | `LUMENPAY_GATEWAY_RETRIES` | Retry attempts after the first failure |

use std::time::Duration;

use crate::address::{AddressError, WalletAddress};

/// Compiled-in platform settlement address, overridable by environment.
const DEFAULT_PLATFORM_WALLET: &str =
    "GDQP2KPQGKIHYJGXNUIYOMHARUARCA7DJT5FO2FFOOKY3B2WSQHG4W37";

/// Default gateway base URL for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The platform wallet address failed format validation.
    #[error("invalid platform wallet address: {0}")]
    InvalidPlatformWallet(#[from] AddressError),

    /// An environment variable held a non-numeric value.
    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Approval/Completion gateway call policy.
///
/// The original system issued these calls with no timeout and no retry;
/// both are explicit configuration here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Retry attempts after the first failure.
    pub retry_attempts: u32,
    /// Linear backoff between attempts.
    pub retry_backoff: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            retry_attempts: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Complete wallet core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Fixed receiving address for platform-level settlement.
    pub platform_wallet_address: WalletAddress,
    /// Base URL of the backend exposing the gateway endpoints.
    pub api_base_url: String,
    /// Gateway call policy.
    pub gateway: GatewayConfig,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            // Pinned valid by `test_default_platform_wallet_is_valid`.
            platform_wallet_address: WalletAddress::parse(DEFAULT_PLATFORM_WALLET)
                .expect("compiled-in platform wallet address is valid"),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl WalletConfig {
    /// Builds configuration from the environment, falling back to defaults.
    ///
    /// Read once at startup; later environment changes are not observed.
    ///
    /// # Errors
    /// - `InvalidPlatformWallet` if the override address fails validation
    /// - `InvalidNumber` if a numeric override cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("LUMENPAY_PLATFORM_WALLET") {
            config.platform_wallet_address = WalletAddress::parse(addr)?;
        }
        if let Ok(url) = std::env::var("LUMENPAY_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(ms) = std::env::var("LUMENPAY_GATEWAY_TIMEOUT_MS") {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "LUMENPAY_GATEWAY_TIMEOUT_MS",
                value: ms.clone(),
            })?;
            config.gateway.request_timeout = Duration::from_millis(ms);
        }
        if let Ok(retries) = std::env::var("LUMENPAY_GATEWAY_RETRIES") {
            let attempts: u32 = retries.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "LUMENPAY_GATEWAY_RETRIES",
                value: retries.clone(),
            })?;
            config.gateway.retry_attempts = attempts;
        }

        Ok(config)
    }
}
