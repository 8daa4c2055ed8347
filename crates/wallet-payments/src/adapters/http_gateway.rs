//! HTTP adapter for the Approval/Completion gateways.
//!
//! Wire contract:
//!
//! - `POST {base}/api/payments/approve` with `{"paymentId", "action": "approve"}`
//! - `POST {base}/api/payments/complete` with `{"paymentId", "txid", "action": "complete"}`
//!
//! A 2xx response with a JSON body is expected. Timeout, retry count, and
//! backoff come from [`GatewayConfig`]; the original system had none of the
//! three.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;
use wallet_types::{GatewayConfig, PaymentId, TxId, WalletConfig};

use crate::ports::outbound::{GatewayError, PaymentGateway};

/// Reqwest-backed gateway client.
pub struct HttpPaymentGateway {
    client: Client,
    base_url: String,
    config: GatewayConfig,
}

impl HttpPaymentGateway {
    /// Builds a client with the configured per-request timeout.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(config: &WalletConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.gateway.request_timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            config: config.gateway.clone(),
        })
    }

    fn classify(error: &reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(error.to_string())
        }
    }

    /// Posts `body` to `path`, retrying with linear backoff.
    async fn post_with_retries(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let attempts = self.config.retry_attempts + 1;
        let mut last_error = GatewayError::Timeout;

        for attempt in 1..=attempts {
            match self.client.post(&url).json(body).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    last_error = GatewayError::Status(response.status().as_u16());
                }
                Err(e) => {
                    last_error = Self::classify(&e);
                }
            }
            if attempt < attempts {
                warn!(url = %url, attempt, error = %last_error, "gateway call failed, retrying");
                tokio::time::sleep(self.config.retry_backoff).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn approve(&self, payment_id: &PaymentId) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "paymentId": payment_id.as_str(),
            "action": "approve",
        });
        self.post_with_retries("/api/payments/approve", &body).await
    }

    async fn complete(&self, payment_id: &PaymentId, txid: &TxId) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "paymentId": payment_id.as_str(),
            "txid": txid.as_str(),
            "action": "complete",
        });
        self.post_with_retries("/api/payments/complete", &body).await
    }
}
