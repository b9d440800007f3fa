//! HTTP client for the Bundlr node.
//!
//! One method per node endpoint. Read-only lookups (balance, price, info)
//! retry with the idempotent policy; the funding registration and the
//! upload itself are posted exactly once.

use reqwest::Client;
use serde::de::DeserializeOwned;
use solana_pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{HttpError, MaintainerError, StorageError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::storage::item::DataItem;
use crate::storage::wire::{BalanceResponse, NodeInfo, UploadReceipt};

/// Client bound to one Bundlr node and one currency.
pub struct BundlrClient {
    node_url: String,
    gateway_url: String,
    currency: String,
    client: Client,
    retry: RetryConfig,
}

impl BundlrClient {
    pub fn new(node_url: &str, gateway_url: &str, currency: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            node_url: node_url.trim_end_matches('/').to_string(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            currency: currency.to_string(),
            client,
            retry: RetryConfig::default(),
        }
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Public URL an uploaded item is served from.
    pub fn upload_url(&self, id: &str) -> String {
        format!("{}/{}", self.gateway_url, id)
    }

    // ── Node endpoints ───────────────────────────────────────────────────

    /// `GET /info`: node version and per-currency deposit addresses.
    pub async fn node_info(&self) -> Result<NodeInfo, HttpError> {
        let url = format!("{}/info", self.node_url);
        self.get_json(&url, RetryPolicy::Idempotent).await
    }

    /// `GET /account/balance/{currency}?address=…`: funded balance in
    /// lamports for the given owner.
    pub async fn balance(&self, owner: &Pubkey) -> Result<u64, HttpError> {
        let url = format!(
            "{}/account/balance/{}?address={}",
            self.node_url, self.currency, owner
        );
        let resp: BalanceResponse = self.get_json(&url, RetryPolicy::Idempotent).await?;
        Ok(resp.balance)
    }

    /// `GET /price/{currency}/{bytes}`: lamports to store a payload of the
    /// given serialized size. The node answers with a bare decimal body.
    pub async fn price(&self, bytes: u64) -> Result<u64, HttpError> {
        let url = format!("{}/price/{}/{}", self.node_url, self.currency, bytes);
        let body = self.get_text(&url, RetryPolicy::Idempotent).await?;
        body.trim()
            .parse()
            .map_err(|_| HttpError::InvalidBody(body))
    }

    /// `POST /account/balance/{currency}`: tell the node about an on-chain
    /// funding transfer so it credits the account. Never retried.
    pub async fn register_funding(&self, tx_signature: &str) -> Result<(), HttpError> {
        let url = format!("{}/account/balance/{}", self.node_url, self.currency);
        let body = serde_json::json!({ "tx_id": tx_signature });
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// `POST /tx/{currency}`: submit a signed data item. Never retried.
    ///
    /// Fails if the node's receipt carries a different id than the one
    /// computed locally from the signature.
    pub async fn submit(&self, item: &DataItem) -> Result<UploadReceipt, MaintainerError> {
        let expected = item.id().ok_or(StorageError::Unsigned)?;
        let bytes = item.to_bytes()?;

        let url = format!("{}/tx/{}", self.node_url, self.currency);
        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(HttpError::from)?;
        let resp = Self::check_status(resp).await?;
        let receipt: UploadReceipt = resp.json().await.map_err(HttpError::from)?;

        if receipt.id != expected {
            return Err(StorageError::IdMismatch {
                expected,
                returned: receipt.id,
            }
            .into());
        }
        Ok(receipt)
    }

    /// Deposit address the node expects funding transfers on, for the
    /// configured currency.
    pub fn deposit_address(&self, info: &NodeInfo) -> Result<Pubkey, StorageError> {
        let address =
            info.addresses
                .get(&self.currency)
                .ok_or_else(|| StorageError::NoDepositAddress {
                    currency: self.currency.clone(),
                })?;
        Pubkey::from_str(address).map_err(|_| StorageError::InvalidDepositAddress {
            address: address.clone(),
        })
    }

    // ── Internal HTTP plumbing ───────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let resp = self.get_with_retry(url, retry).await?;
        Ok(resp.json().await?)
    }

    async fn get_text(&self, url: &str, retry: RetryPolicy) -> Result<String, HttpError> {
        let resp = self.get_with_retry(url, retry).await?;
        Ok(resp.text().await?)
    }

    async fn get_with_retry(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<reqwest::Response, HttpError> {
        if matches!(retry, RetryPolicy::None) {
            let resp = self.client.get(url).send().await?;
            return Self::check_status(resp).await;
        }

        let mut last_error = None;

        for attempt in 0..=self.retry.max_retries {
            let result = match self.client.get(url).send().await {
                Ok(resp) => Self::check_status(resp).await,
                Err(e) => Err(HttpError::from(e)),
            };

            match result {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            self.retry.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < self.retry.max_retries {
                        let delay = self.retry.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = self.retry.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: self.retry.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let retry_after_ms = resp
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1_000);

        let status_code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        match status_code {
            404 => Err(HttpError::NotFound(body)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body,
            }),
        }
    }
}
