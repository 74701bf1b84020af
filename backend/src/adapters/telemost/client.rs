//! Telemost Client - Implementation of ConferenceProvider for the Yandex Telemost API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelemostClientConfig::new(oauth_token)
//!     .with_base_url("https://cloud-api.yandex.net/v1/telemost-api")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_retries(2)
//!     .with_deadline(Duration::from_secs(25));
//!
//! let client = TelemostClient::new(config)?;
//! ```
//!
//! # Failure classification
//!
//! | Answer | Error | Retried |
//! |--------|-------|---------|
//! | 401 / 403 | `Unauthorized` | no |
//! | 404 | `NotFound` (update), success (delete) | no |
//! | 405 / 501 | `Unsupported` | no |
//! | 429 | `RateLimited` | no |
//! | other 4xx | `InvalidRequest` | no |
//! | 5xx, timeout, connect error, bad body | `Unavailable` | yes |
//!
//! Retries stop once the operation's deadline passes; the caller then sees
//! `Unavailable` no matter which attempt was in flight.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use super::wire::{ConferenceRequest, ConferenceResponse};
use crate::config::TelemostConfig;
use crate::ports::{ConferenceProvider, MeetingSpec, ProviderError, ProviderMeeting};

/// Retry-After used when a 429 carries none.
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Configuration for the Telemost client.
#[derive(Debug, Clone)]
pub struct TelemostClientConfig {
    /// OAuth token for the `Authorization: OAuth` header.
    oauth_token: Secret<String>,
    /// API root, e.g. https://cloud-api.yandex.net/v1/telemost-api
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// First retry delay; doubled on every further attempt.
    pub retry_backoff: Duration,
    /// Total time allowed for one operation, retries included.
    pub deadline: Duration,
}

impl TelemostClientConfig {
    /// Creates a new configuration with the given OAuth token.
    pub fn new(oauth_token: impl Into<String>) -> Self {
        Self {
            oauth_token: Secret::new(oauth_token.into()),
            base_url: "https://cloud-api.yandex.net/v1/telemost-api".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            deadline: Duration::from_secs(25),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first retry delay.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Sets the total budget for one operation.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    fn oauth_token(&self) -> &str {
        self.oauth_token.expose_secret()
    }
}

impl From<&TelemostConfig> for TelemostClientConfig {
    fn from(config: &TelemostConfig) -> Self {
        TelemostClientConfig::new(config.oauth_token.clone())
            .with_base_url(config.api_base.clone())
            .with_timeout(config.timeout())
            .with_max_retries(config.max_retries)
            .with_retry_backoff(config.retry_backoff())
            .with_deadline(config.deadline())
    }
}

/// Telemost API client.
pub struct TelemostClient {
    config: TelemostClientConfig,
    client: Client,
}

impl TelemostClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: TelemostClientConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn conferences_url(&self) -> String {
        format!("{}/conferences", self.config.base_url)
    }

    fn conference_url(&self, provider_id: &str) -> String {
        format!("{}/conferences/{}", self.config.base_url, provider_id)
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.config.oauth_token())
    }

    /// Maps transport failures; all of them are transient.
    fn send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::unavailable(format!(
                "request timed out after {}ms",
                self.config.timeout.as_millis()
            ))
        } else if e.is_connect() {
            ProviderError::unavailable(format!("Connection failed: {}", e))
        } else {
            ProviderError::unavailable(e.to_string())
        }
    }

    async fn send_create(&self, spec: &MeetingSpec) -> Result<ProviderMeeting, ProviderError> {
        let response = self
            .client
            .post(self.conferences_url())
            .header("Authorization", self.authorization())
            .json(&ConferenceRequest::from(spec))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    // POST is not idempotent: the provider may have created
                    // the meeting before we stopped waiting.
                    tracing::warn!(
                        "Telemost create timed out; a meeting may exist that will be orphaned if a retry succeeds"
                    );
                }
                self.send_error(e)
            })?;

        match check_status(response).await {
            Ok(response) => parse_meeting(response).await,
            Err(ProviderError::NotFound) => Err(ProviderError::invalid_request(
                "conferences endpoint not found",
            )),
            Err(err) => Err(err),
        }
    }

    async fn send_update(
        &self,
        provider_id: &str,
        spec: &MeetingSpec,
    ) -> Result<ProviderMeeting, ProviderError> {
        let response = self
            .client
            .patch(self.conference_url(provider_id))
            .header("Authorization", self.authorization())
            .json(&ConferenceRequest::from(spec))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let response = check_status(response).await?;
        parse_meeting(response).await
    }

    async fn send_delete(&self, provider_id: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(self.conference_url(provider_id))
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        match check_status(response).await {
            Ok(_) | Err(ProviderError::NotFound) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Runs `call` until it succeeds, fails permanently, retries run out, or
    /// the deadline passes.
    async fn with_retries<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        match timeout(self.config.deadline, self.retry_loop(operation, call)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    deadline_ms = self.config.deadline.as_millis() as u64,
                    "Telemost call abandoned at deadline"
                );
                if operation == "create" {
                    tracing::warn!(
                        "Abandoned Telemost create may have produced a meeting that is now orphaned"
                    );
                }
                Err(ProviderError::unavailable(format!(
                    "{} gave up after {}ms",
                    operation,
                    self.config.deadline.as_millis()
                )))
            }
        }
    }

    async fn retry_loop<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut retry_count = 0;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(
                        operation,
                        attempt = retry_count + 1,
                        error = %err,
                        "Telemost call failed, retrying"
                    );
                }
            }

            // Exponential backoff: base, 2x base, 4x base, ...
            let delay = self.config.retry_backoff * (1u32 << retry_count.min(16));
            sleep(delay).await;
            retry_count += 1;
        }
    }
}

#[async_trait]
impl ConferenceProvider for TelemostClient {
    async fn create_meeting(&self, spec: &MeetingSpec) -> Result<ProviderMeeting, ProviderError> {
        let meeting = self
            .with_retries("create", || self.send_create(spec))
            .await?;
        tracing::debug!(provider_id = %meeting.provider_id, "Telemost meeting created");
        Ok(meeting)
    }

    async fn update_meeting(
        &self,
        provider_id: &str,
        spec: &MeetingSpec,
    ) -> Result<ProviderMeeting, ProviderError> {
        let meeting = self
            .with_retries("update", || self.send_update(provider_id, spec))
            .await?;
        tracing::debug!(provider_id, "Telemost meeting updated");
        Ok(meeting)
    }

    async fn delete_meeting(&self, provider_id: &str) -> Result<(), ProviderError> {
        self.with_retries("delete", || self.send_delete(provider_id))
            .await?;
        tracing::debug!(provider_id, "Telemost meeting deleted");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

/// Passes successful responses through and classifies everything else.
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = parse_retry_after(response.headers());
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, retry_after, &body))
}

fn classify_status(status: StatusCode, retry_after: Option<u32>, body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Unauthorized,
        404 => ProviderError::NotFound,
        405 | 501 => ProviderError::Unsupported,
        429 => ProviderError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        400..=499 => ProviderError::invalid_request(format!("{}: {}", status, body)),
        _ => ProviderError::unavailable(format!("Server error {}: {}", status, body)),
    }
}

/// Reads `Retry-After` given as delta-seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
}

async fn parse_meeting(response: Response) -> Result<ProviderMeeting, ProviderError> {
    let body: ConferenceResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::unavailable(format!("Failed to parse response: {}", e)))?;

    body.into_meeting()
        .ok_or_else(|| ProviderError::unavailable("Response has no join URL"))
}
