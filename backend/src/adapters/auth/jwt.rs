//! HS256 token issuer and validator.
//!
//! Access tokens and refresh tokens are signed with separate secrets and carry
//! a `typ` claim, so neither can stand in for the other. Validation has zero
//! leeway on `exp`. Tokens minted for a portal session also carry the portal
//! host and the role granted there.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, Timestamp, UserId};
use crate::ports::SessionValidator;

/// Name of the cookie that carries the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

const ACCESS_TYPE: &str = "access";
const REFRESH_TYPE: &str = "refresh";

/// JWT claims shared by both token kinds.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    portal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    typ: String,
    iat: i64,
    exp: i64,
    jti: String,
}

impl Claims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.sub).map_err(|_| AuthError::InvalidToken)?;
        let user = AuthenticatedUser::new(id, self.name, self.email);
        Ok(match (self.portal, self.role) {
            (Some(portal), Some(role)) => user.with_grant(portal, role),
            _ => user,
        })
    }
}

/// A freshly minted token pair.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates the bridge's own session tokens.
pub struct JwtTokenService {
    access_secret: Secret<String>,
    refresh_secret: Secret<String>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            access_secret: Secret::new(access_secret.into()),
            refresh_secret: Secret::new(refresh_secret.into()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.refresh_secret.clone(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        )
    }

    /// Lifetime of refresh tokens; also the refresh cookie's Max-Age.
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    /// Mints an access and a refresh token for `user`.
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedTokens, AuthError> {
        Ok(IssuedTokens {
            access_token: self.issue_access(user)?,
            refresh_token: self.sign(
                user,
                REFRESH_TYPE,
                self.refresh_ttl_secs,
                &self.refresh_secret,
            )?,
        })
    }

    /// Mints an access token only.
    pub fn issue_access(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        self.sign(user, ACCESS_TYPE, self.access_ttl_secs, &self.access_secret)
    }

    /// Validates a refresh token and returns the identity it was issued for.
    ///
    /// The caller re-checks the grant and mints the new access token; the
    /// refresh token itself is not rotated.
    pub fn verify_refresh(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.check(token, REFRESH_TYPE, &self.refresh_secret)
    }

    /// Validates an access token.
    pub fn verify(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.check(access_token, ACCESS_TYPE, &self.access_secret)
    }

    fn sign(
        &self,
        user: &AuthenticatedUser,
        typ: &str,
        ttl_secs: i64,
        secret: &Secret<String>,
    ) -> Result<String, AuthError> {
        let now = Timestamp::now();
        let claims = Claims {
            sub: user.id.as_str().to_string(),
            name: user.display_name.clone(),
            email: user.email.clone(),
            portal: user.portal.clone(),
            role: user.role,
            typ: typ.to_string(),
            iat: now.as_unix_secs(),
            exp: now.plus_secs(ttl_secs).as_unix_secs(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn check(
        &self,
        token: &str,
        expected_typ: &str,
        secret: &Secret<String>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                tracing::debug!(typ = expected_typ, "Token expired");
                AuthError::TokenExpired
            }
            _ => {
                tracing::debug!(typ = expected_typ, "Token validation failed: {}", e);
                AuthError::InvalidToken
            }
        })?;

        if data.claims.typ != expected_typ {
            tracing::warn!(
                expected = expected_typ,
                found = %data.claims.typ,
                "Token of the wrong type presented"
            );
            return Err(AuthError::InvalidToken);
        }

        data.claims.into_user()
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.verify(token)
    }
}
