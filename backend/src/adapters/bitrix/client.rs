//! Bitrix24 REST client over an inbound webhook.
//!
//! The webhook URL already embeds the portal credentials, so calls are plain
//! form POSTs to `{webhook}{method}`. Portal answers carry either `result` or
//! `error`/`error_description`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::domain::foundation::UserId;
use crate::ports::{PortalDirectory, PortalError};

const USER_GET: &str = "user.get";

/// Portal directory backed by a Bitrix24 webhook.
pub struct BitrixClient {
    /// Webhook base ending in `/`; `None` when the deployment has none.
    webhook: Option<Secret<String>>,
    client: Client,
}

impl BitrixClient {
    /// Creates a client; `webhook` must end with a slash when present.
    pub fn new(webhook: Option<String>, timeout: Duration) -> Result<Self, PortalError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            webhook: webhook.map(Secret::new),
            client,
        })
    }

    async fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<Value, PortalError> {
        let webhook = self.webhook.as_ref().ok_or(PortalError::NotConfigured)?;
        let url = format!("{}{}", webhook.expose_secret(), method);

        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PortalError::Upstream("portal request timed out".to_string())
                } else {
                    PortalError::Upstream(format!("Connection failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortalError::Upstream(format!("Invalid portal response: {}", e)))?;

        if let Some(error) = body.get("error").and_then(Value::as_str) {
            let description = body
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(PortalError::Upstream(format!("{}: {}", error, description)));
        }
        if !status.is_success() {
            return Err(PortalError::Upstream(format!("portal answered {}", status)));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| PortalError::Upstream("portal response has no result".to_string()))
    }
}

#[async_trait]
impl PortalDirectory for BitrixClient {
    async fn list_users(&self) -> Result<Value, PortalError> {
        self.call(USER_GET, &[]).await
    }

    async fn find_user(&self, id: &UserId) -> Result<Value, PortalError> {
        self.call(USER_GET, &[("ID", id.as_str())]).await
    }
}
