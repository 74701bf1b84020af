//! HTTP routes for token and grant endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::middleware::{auth_middleware, AuthState};

use super::handlers::{
    check_grant, grant_role, issue_tokens, list_grants, refresh_token, revoke_grant,
    PermissionHandlers,
};

/// Creates the permissions router; mounted at `/api/bitrix24/permissions`.
///
/// `/auth`, `/refresh` and `/check` are public so that an expired access
/// token never blocks its own refresh. Grant management needs a bearer token.
pub fn permission_routes(handlers: PermissionHandlers, auth_state: AuthState) -> Router {
    let managed = Router::new()
        .route("/list", get(list_grants))
        .route("/add", post(grant_role))
        .route("/remove", delete(revoke_grant))
        .with_state(handlers.clone())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/auth", post(issue_tokens))
        .route("/refresh", post(refresh_token))
        .route("/check", get(check_grant))
        .with_state(handlers)
        .merge(managed)
}
