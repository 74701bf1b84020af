//! Telemost provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Yandex Telemost API access
#[derive(Debug, Clone, Deserialize)]
pub struct TelemostConfig {
    /// OAuth token of the Yandex account that owns created meetings
    pub oauth_token: String,

    /// API root, without the trailing `/conferences`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in milliseconds, doubled per retry
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,

    /// Budget in seconds for one provider operation, all retries included.
    /// Must stay below `server.request_timeout_secs`.
    #[serde(default = "default_deadline")]
    pub deadline_secs: u64,
}

impl TelemostConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// Time a stalled provider can hold one operation if every attempt runs
    /// into the per-request timeout.
    pub fn worst_case(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        let backoff_steps = 2u32.saturating_pow(self.max_retries.min(16)) - 1;
        self.timeout().saturating_mul(attempts) + self.retry_backoff().saturating_mul(backoff_steps)
    }

    /// Longest a provider operation can actually take: the worst case, cut
    /// short by the deadline.
    pub fn call_budget(&self) -> Duration {
        self.worst_case().min(self.deadline())
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.oauth_token.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TELEMOST__OAUTH_TOKEN"));
        }
        if !self.api_base.starts_with("https://") && !self.api_base.starts_with("http://") {
            return Err(ValidationError::InvalidTelemostUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.deadline_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TelemostConfig {
    fn default() -> Self {
        Self {
            oauth_token: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff(),
            deadline_secs: default_deadline(),
        }
    }
}

fn default_api_base() -> String {
    "https://cloud-api.yandex.net/v1/telemost-api".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff() -> u64 {
    500
}

fn default_deadline() -> u64 {
    25
}
