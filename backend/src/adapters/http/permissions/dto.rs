//! Request and response shapes for the token and grant endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::access::{PortalDomain, PortalGrant};
use crate::domain::foundation::{AuthenticatedUser, Role, Timestamp, UserId, ValidationError};

/// Body of `POST /api/bitrix24/permissions/auth`: the identity the portal
/// SDK reported inside the iframe.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTokenRequest {
    /// Portal host, e.g. `company.bitrix24.ru`.
    #[serde(default)]
    pub domain: Option<String>,
    /// Bitrix24 sends numeric ids from some SDK calls and strings from others.
    #[serde(alias = "userId", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(alias = "userName", default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl IssueTokenRequest {
    pub fn validate(self) -> Result<(PortalDomain, AuthenticatedUser), ValidationError> {
        let portal = PortalDomain::new(self.domain.as_deref().unwrap_or_default())?;
        let id = required_user_id(self.user_id)?;
        let name = self
            .user_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("User {}", id));
        let email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok((portal, AuthenticatedUser::new(id, name, email)))
    }
}

fn required_user_id(raw: Option<String>) -> Result<UserId, ValidationError> {
    UserId::new(raw.unwrap_or_default().trim()).map_err(|_| ValidationError::empty_field("user_id"))
}

fn optional_portal(raw: Option<String>) -> Result<Option<PortalDomain>, ValidationError> {
    raw.filter(|d| !d.trim().is_empty())
        .map(|d| PortalDomain::new(&d))
        .transpose()
}

/// Identity echoed back next to a fresh access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl From<&AuthenticatedUser> for TokenUser {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Response of both token endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub user: TokenUser,
}

/// Query of `GET /check`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckGrantParams {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(alias = "userId", default)]
    pub user_id: Option<String>,
}

impl CheckGrantParams {
    pub fn validate(self) -> Result<(PortalDomain, UserId), ValidationError> {
        let portal = PortalDomain::new(self.domain.as_deref().unwrap_or_default())?;
        Ok((portal, required_user_id(self.user_id)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckGrantResponse {
    pub has_permission: bool,
    pub role: Option<Role>,
}

/// Query of `GET /list`; the portal defaults to the caller's.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListGrantsParams {
    #[serde(default)]
    pub domain: Option<String>,
}

impl ListGrantsParams {
    pub fn validate(self) -> Result<Option<PortalDomain>, ValidationError> {
        optional_portal(self.domain)
    }
}

/// Body of `POST /add`.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantRoleRequest {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(alias = "userId", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(alias = "userName", default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Validated form of [`GrantRoleRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRoleInput {
    pub portal: Option<PortalDomain>,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub role: Role,
}

impl GrantRoleRequest {
    pub fn validate(self) -> Result<GrantRoleInput, ValidationError> {
        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ValidationError::empty_field("role"))?
            .parse()?;

        Ok(GrantRoleInput {
            portal: optional_portal(self.domain)?,
            user_id: required_user_id(self.user_id)?,
            user_name: self
                .user_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            role,
        })
    }
}

/// Body of `DELETE /remove`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevokeGrantRequest {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(alias = "userId", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
}

impl RevokeGrantRequest {
    pub fn validate(self) -> Result<(Option<PortalDomain>, UserId), ValidationError> {
        Ok((optional_portal(self.domain)?, required_user_id(self.user_id)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrantResponse {
    pub domain: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub role: Role,
    pub granted_at: Timestamp,
    pub granted_by: Option<String>,
}

impl From<PortalGrant> for GrantResponse {
    fn from(grant: PortalGrant) -> Self {
        Self {
            domain: grant.portal.as_str().to_string(),
            user_id: grant.user_id.as_str().to_string(),
            user_name: grant.user_name,
            role: grant.role,
            granted_at: grant.granted_at,
            granted_by: grant.granted_by.map(|id| id.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListGrantsResponse {
    pub permissions: Vec<GrantResponse>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOMAIN: &str = "company.bitrix24.ru";

    fn parse(mut body: serde_json::Value) -> Result<AuthenticatedUser, ValidationError> {
        if body.get("domain").is_none() {
            body["domain"] = json!(DOMAIN);
        }
        serde_json::from_value::<IssueTokenRequest>(body)
            .unwrap()
            .validate()
            .map(|(_, user)| user)
    }

    #[test]
    fn accepts_snake_and_camel_case() {
        let snake = parse(json!({ "user_id": "17", "user_name": "Ivan" })).unwrap();
        let camel = parse(json!({ "userId": 17, "userName": "Ivan" })).unwrap();

        assert_eq!(snake, camel);
        assert_eq!(snake.id.as_str(), "17");
        assert_eq!(snake.email, None);
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let err = parse(json!({ "user_name": "Ivan" })).unwrap_err();
        assert_eq!(err.field(), "user_id");

        assert!(parse(json!({ "user_id": "  " })).is_err());
    }

    #[test]
    fn missing_domain_is_rejected() {
        let err = parse(json!({ "user_id": "17", "domain": "" })).unwrap_err();
        assert_eq!(err.field(), "domain");
    }

    #[test]
    fn domain_is_normalized() {
        let (portal, _) = serde_json::from_value::<IssueTokenRequest>(json!({
            "domain": "https://Company.Bitrix24.ru/",
            "user_id": "17",
        }))
        .unwrap()
        .validate()
        .unwrap();

        assert_eq!(portal.as_str(), DOMAIN);
    }

    #[test]
    fn blank_name_falls_back_to_id() {
        let user = parse(json!({ "user_id": "17", "user_name": " ", "email": "" })).unwrap();

        assert_eq!(user.display_name, "User 17");
        assert_eq!(user.email, None);
    }

    #[test]
    fn token_response_uses_camel_case() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            user: TokenUser {
                id: "17".to_string(),
                name: "Ivan".to_string(),
                email: None,
                role: Some(Role::Observer),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "abc");
        assert_eq!(json["user"]["id"], "17");
        assert_eq!(json["user"]["role"], "observer");
    }

    #[test]
    fn grant_request_requires_known_role() {
        let parse = |body| serde_json::from_value::<GrantRoleRequest>(body).unwrap().validate();

        let ok = parse(json!({ "userId": 30, "role": "admin" })).unwrap();
        assert_eq!(ok.role, Role::Admin);
        assert_eq!(ok.portal, None);

        assert_eq!(parse(json!({ "user_id": "30" })).unwrap_err().field(), "role");
        assert_eq!(
            parse(json!({ "user_id": "30", "role": "owner" })).unwrap_err().field(),
            "role"
        );
    }

    #[test]
    fn check_response_uses_camel_case() {
        let json = serde_json::to_value(CheckGrantResponse {
            has_permission: false,
            role: None,
        })
        .unwrap();

        assert_eq!(json, json!({ "hasPermission": false, "role": null }));
    }
}
