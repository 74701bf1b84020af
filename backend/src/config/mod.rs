//! Bridge settings, read from `TELEMOST_BRIDGE__*` environment variables.
//!
//! A `.env` file in the working directory is honoured. Sections map to the
//! second path segment: `TELEMOST_BRIDGE__BITRIX__WEBHOOK_URL` lands in
//! [`BitrixConfig::webhook_url`].
//!
//! ```no_run
//! use telemost_bridge::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod access;
mod auth;
mod bitrix;
mod database;
mod error;
mod server;
mod telemost;

pub use access::AccessConfig;
pub use auth::AuthConfig;
pub use bitrix::BitrixConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use telemost::TelemostConfig;

use serde::Deserialize;

/// Every setting the bridge reads at startup.
///
/// Built once in `main` and handed to constructors; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, base path, CORS and logging.
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Access and refresh token secrets.
    pub auth: AuthConfig,

    pub telemost: TelemostConfig,

    /// Absent webhook disables the portal user endpoints.
    #[serde(default)]
    pub bitrix: BitrixConfig,

    /// Bootstrap admins for portals without grants.
    #[serde(default)]
    pub access: AccessConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// `TELEMOST_BRIDGE__SERVER__PORT=8080` sets `server.port`. Fails when a
    /// required secret is missing or a value does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TELEMOST_BRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks ranges and cross-field rules that deserialization cannot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.telemost.validate()?;
        self.bitrix.validate(&self.server.environment)?;
        self.access.validate()?;

        // A request cut off by the HTTP timeout never reports the provider
        // failure and may leave a created meeting unrecorded.
        let budget = self.telemost.call_budget();
        let request_timeout = self.server.request_timeout();
        if budget >= request_timeout {
            return Err(ValidationError::ProviderBudgetTooLong {
                budget_ms: budget.as_millis(),
                request_timeout_ms: request_timeout.as_millis(),
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
