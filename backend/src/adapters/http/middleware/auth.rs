//! Bearer access tokens on every protected route.
//!
//! `auth_middleware` resolves the token through the `SessionValidator` port
//! (the JWT issuer in production, a table of known tokens in tests) and
//! stores the caller in request extensions. Handlers take `RequireAuth` to
//! read it back; a request that never carried a token is rejected there.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// State for [`auth_middleware`].
pub type AuthState = Arc<dyn SessionValidator>;

/// A missing header passes through untouched so that `RequireAuth` decides;
/// a present but bad token is rejected here with 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => auth_error_response(&err),
    }
}

/// Maps an authentication failure to its 401 body.
pub fn auth_error_response(err: &AuthError) -> Response {
    if !err.requires_reauthentication() {
        tracing::error!("{}", err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR")),
        )
            .into_response();
    }

    let (message, code) = match err {
        AuthError::TokenExpired => ("Token expired", "TOKEN_EXPIRED"),
        AuthError::MissingToken => ("Authentication required", "UNAUTHENTICATED"),
        _ => ("Invalid token", "AUTH_ERROR"),
    };

    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message, code))).into_response()
}

/// The caller resolved by [`auth_middleware`]; 401 when absent.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid access token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => auth_error_response(&AuthError::MissingToken),
        }
    }
}
