//! Portal directory port.
//!
//! Read-only access to the Bitrix24 user directory, used by the pass-through
//! endpoints. Results are returned as the portal's raw JSON `result` payload.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Looks users up in the portal.
#[async_trait]
pub trait PortalDirectory: Send + Sync {
    /// All users visible to the configured webhook.
    async fn list_users(&self) -> Result<Value, PortalError>;

    /// The portal's record for a single user id.
    async fn find_user(&self, id: &UserId) -> Result<Value, PortalError>;
}

/// Failures talking to the portal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// No webhook is configured for this deployment.
    #[error("portal access is not configured")]
    NotConfigured,

    /// The portal answered with an error or could not be reached.
    #[error("portal request failed: {0}")]
    Upstream(String),
}
