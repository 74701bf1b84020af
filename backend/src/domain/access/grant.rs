//! Portal grants and the portal domain value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

/// Host name of a Bitrix24 portal, e.g. `company.bitrix24.ru`.
///
/// Stored lowercase without scheme or trailing slash, so that the same portal
/// always maps to the same grant rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalDomain(String);

impl PortalDomain {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let host = raw.trim();
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host)
            .trim_end_matches('/')
            .to_ascii_lowercase();

        if host.is_empty() {
            return Err(ValidationError::empty_field("domain"));
        }
        if host.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(ValidationError::invalid_format(
                "domain",
                "expected a portal host name",
            ));
        }
        Ok(Self(host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permission for one user of one portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalGrant {
    pub portal: PortalDomain,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub role: Role,
    pub granted_at: Timestamp,
    /// Admin who issued the grant; `None` for bootstrap admins.
    pub granted_by: Option<UserId>,
}

impl PortalGrant {
    pub fn new(
        portal: PortalDomain,
        user_id: UserId,
        user_name: Option<String>,
        role: Role,
        granted_by: Option<UserId>,
    ) -> Self {
        Self {
            portal,
            user_id,
            user_name,
            role,
            granted_at: Timestamp::now(),
            granted_by,
        }
    }
}
