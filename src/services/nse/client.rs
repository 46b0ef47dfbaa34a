//! NSE option-chain client
//!
//! The exchange only serves the API to clients carrying cookies from its home
//! page, so the client keeps a cookie store and re-bootstraps the session when
//! the API answers 401/403.

use async_trait::async_trait;
use backon::Retryable;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::messages::OptionChainResponse;
use crate::config::Config;
use crate::models::chain::ChainSnapshot;
use crate::services::error::FetchError;
use crate::services::market_data::OptionChainProvider;
use crate::services::retry::RetryPolicy;

pub struct NseClient {
    http: reqwest::Client,
    home_url: String,
    chain_url: String,
    retry: RetryPolicy,
}

impl NseClient {
    pub fn new(
        home_url: impl Into<String>,
        chain_url: impl Into<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            home_url: home_url.into(),
            chain_url: chain_url.into(),
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.nse_home_url.clone(),
            config.option_chain_url.clone(),
            config.retry,
            config.http_timeout,
        )
    }

    /// Visit the home page to pick up session cookies
    pub async fn bootstrap_session(&self) -> Result<(), FetchError> {
        let response = self.http.get(&self.home_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.home_url.clone(),
            });
        }

        info!(url = %self.home_url, "NseClient: session cookies refreshed");
        Ok(())
    }

    async fn fetch_once(&self) -> Result<ChainSnapshot, FetchError> {
        let response = self.http.get(&self.chain_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let err = FetchError::Status {
                status,
                url: self.chain_url.clone(),
            };
            if err.is_session_rejected() {
                if let Err(e) = self.bootstrap_session().await {
                    warn!(error = %e, "NseClient: session re-bootstrap failed");
                }
            }
            return Err(err);
        }

        let body = response.bytes().await?;
        let parsed: OptionChainResponse = serde_json::from_slice(&body)?;
        let snapshot = parsed.into_snapshot()?;

        debug!(
            rows = snapshot.rows().len(),
            underlying = ?snapshot.underlying_value(),
            "NseClient: option chain fetched"
        );
        Ok(snapshot)
    }

    /// Fetch the chain, retrying with exponential backoff
    pub async fn fetch_with_retry(&self) -> Result<ChainSnapshot, FetchError> {
        (|| self.fetch_once())
            .retry(self.retry.backoff())
            .when(FetchError::is_retryable)
            .notify(|err: &FetchError, delay: Duration| {
                warn!(
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "NseClient: option chain fetch failed, retrying in {:?}",
                    delay
                );
            })
            .await
    }
}

#[async_trait]
impl OptionChainProvider for NseClient {
    async fn fetch_chain_snapshot(&self) -> Option<ChainSnapshot> {
        match self.fetch_with_retry().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(
                    error = %e,
                    attempts = self.retry.max_attempts,
                    "NseClient: option chain unavailable"
                );
                None
            }
        }
    }
}
