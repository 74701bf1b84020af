//! Bitrix24 portal configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Optional inbound webhook for portal directory lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitrixConfig {
    /// Webhook URL, e.g. `https://portal.bitrix24.ru/rest/1/abc123/`
    pub webhook_url: Option<String>,
}

impl BitrixConfig {
    /// Webhook URL with a guaranteed trailing slash, when configured.
    pub fn webhook_base(&self) -> Option<String> {
        let url = self.webhook_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        if url.ends_with('/') {
            Some(url.to_string())
        } else {
            Some(format!("{}/", url))
        }
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if let Some(url) = self.webhook_base() {
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::WebhookMustBeHttps);
            }
        }
        Ok(())
    }
}
