//! Authentication types for the domain layer.
//!
//! These types represent the Bitrix24 user a request acts on behalf of. They
//! have **no external dependencies**: the JWT adapter populates them through
//! the `SessionValidator` port, and handlers only ever see this shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{UserId, ValidationError};

/// Access level granted to a portal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages conferences and the grant table of its portal.
    Admin,
    /// Manages its own conferences only.
    Observer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Observer => "observer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "observer" => Ok(Role::Observer),
            _ => Err(ValidationError::invalid_format(
                "role",
                "expected 'admin' or 'observer'",
            )),
        }
    }
}

/// Portal user proven by a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Bitrix24 user id. The only legitimate source of a conference owner.
    pub id: UserId,

    /// Display name as reported by the portal SDK.
    pub display_name: String,

    /// E-mail address, when the portal shared one.
    pub email: Option<String>,

    /// Portal domain the session was granted on.
    pub portal: Option<String>,

    /// Role held on `portal` when the token was minted.
    pub role: Option<Role>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, display_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email,
            portal: None,
            role: None,
        }
    }

    /// Binds the identity to the grant that admitted it.
    pub fn with_grant(mut self, portal: impl Into<String>, role: Role) -> Self {
        self.portal = Some(portal.into());
        self.role = Some(role);
        self
    }
}

/// Authentication errors that can occur during token issue or validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("Missing credentials")]
    MissingToken,

    /// The token is malformed, has a bad signature, or is of the wrong type.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Signing failed on our side.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Returns true if this error indicates the client should refresh or
    /// re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            UserId::new("17").unwrap(),
            "Ivan Petrov",
            Some("ivan@example.com".to_string()),
        );

        assert_eq!(user.id.as_str(), "17");
        assert_eq!(user.display_name, "Ivan Petrov");
        assert_eq!(user.email.as_deref(), Some("ivan@example.com"));
    }

    #[test]
    fn with_grant_records_portal_and_role() {
        let user = AuthenticatedUser::new(UserId::new("17").unwrap(), "Ivan", None)
            .with_grant("portal.bitrix24.ru", Role::Observer);

        assert_eq!(user.portal.as_deref(), Some("portal.bitrix24.ru"));
        assert_eq!(user.role, Some(Role::Observer));
    }

    #[test]
    fn role_parses_only_known_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("observer".parse::<Role>().unwrap(), Role::Observer);
        assert!("owner".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn auth_error_token_expired_displays_correctly() {
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::MissingToken.requires_reauthentication());
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::Signing("boom".into()).requires_reauthentication());
    }
}
