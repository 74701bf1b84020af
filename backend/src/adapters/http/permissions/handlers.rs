//! HTTP handlers for token issue, refresh and grant management.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::adapters::auth::{JwtTokenService, REFRESH_COOKIE};
use crate::adapters::http::error::{AccessApiError, ErrorResponse};
use crate::adapters::http::middleware::{auth_error_response, RequireAuth};
use crate::application::handlers::access::{
    CheckGrantHandler, CheckGrantQuery, GrantRoleCommand, GrantRoleHandler, ListGrantsHandler,
    ListGrantsQuery, OpenSessionCommand, OpenSessionHandler, RenewSessionCommand,
    RenewSessionHandler, RevokeGrantCommand, RevokeGrantHandler,
};
use crate::ports::GrantRepository;

use super::dto::{
    CheckGrantParams, CheckGrantResponse, GrantResponse, GrantRoleRequest, IssueTokenRequest,
    ListGrantsParams, ListGrantsResponse, RevokeGrantRequest, TokenResponse, TokenUser,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PermissionHandlers {
    tokens: Arc<JwtTokenService>,
    /// Path attribute of the refresh cookie: `<base_path>/api`.
    cookie_path: String,
    open_handler: Arc<OpenSessionHandler>,
    renew_handler: Arc<RenewSessionHandler>,
    check_handler: Arc<CheckGrantHandler>,
    list_handler: Arc<ListGrantsHandler>,
    grant_handler: Arc<GrantRoleHandler>,
    revoke_handler: Arc<RevokeGrantHandler>,
}

impl PermissionHandlers {
    pub fn new(
        tokens: Arc<JwtTokenService>,
        grants: Arc<dyn GrantRepository>,
        base_path: &str,
    ) -> Self {
        Self {
            tokens,
            cookie_path: format!("{}/api", base_path),
            open_handler: Arc::new(OpenSessionHandler::new(grants.clone())),
            renew_handler: Arc::new(RenewSessionHandler::new(grants.clone())),
            check_handler: Arc::new(CheckGrantHandler::new(grants.clone())),
            list_handler: Arc::new(ListGrantsHandler::new(grants.clone())),
            grant_handler: Arc::new(GrantRoleHandler::new(grants.clone())),
            revoke_handler: Arc::new(RevokeGrantHandler::new(grants)),
        }
    }

    fn refresh_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE, token))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .path(self.cookie_path.clone())
            .max_age(time::Duration::seconds(self.tokens.refresh_ttl_secs()))
            .build()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session tokens
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/bitrix24/permissions/auth - Exchange a granted portal identity for tokens
pub async fn issue_tokens(
    State(handlers): State<PermissionHandlers>,
    jar: CookieJar,
    body: Result<Json<IssueTokenRequest>, JsonRejection>,
) -> Response {
    let (portal, user) = match body.map(|Json(req)| req.validate()) {
        Ok(Ok(identity)) => identity,
        Ok(Err(err)) => return validation_error(err.to_string()),
        Err(rejection) => return validation_error(rejection.body_text()),
    };

    let user = match handlers
        .open_handler
        .handle(OpenSessionCommand { portal, user })
        .await
    {
        Ok(user) => user,
        Err(err) => return AccessApiError(err).into_response(),
    };

    let issued = match handlers.tokens.issue(&user) {
        Ok(issued) => issued,
        Err(err) => return auth_error_response(&err),
    };

    tracing::info!(user_id = %user.id, role = ?user.role, "Session tokens issued");

    let jar = jar.add(handlers.refresh_cookie(issued.refresh_token));
    let response = TokenResponse {
        access_token: issued.access_token,
        user: TokenUser::from(&user),
    };
    (jar, Json(response)).into_response()
}

/// POST /api/bitrix24/permissions/refresh - Mint a new access token from the refresh cookie
///
/// The grant is looked up again, so the new token carries the current role.
pub async fn refresh_token(State(handlers): State<PermissionHandlers>, jar: CookieJar) -> Response {
    let cookie = jar.get(REFRESH_COOKIE).map(|c| c.value());

    let user = match handlers.tokens.verify_refresh(cookie) {
        Ok(user) => user,
        Err(err) => {
            tracing::debug!(error = %err, "Refresh rejected");
            return auth_error_response(&err);
        }
    };

    let user = match handlers
        .renew_handler
        .handle(RenewSessionCommand { user })
        .await
    {
        Ok(user) => user,
        Err(err) => return AccessApiError(err).into_response(),
    };

    match handlers.tokens.issue_access(&user) {
        Ok(access_token) => {
            tracing::debug!(user_id = %user.id, "Access token refreshed");
            Json(TokenResponse {
                access_token,
                user: TokenUser::from(&user),
            })
            .into_response()
        }
        Err(err) => auth_error_response(&err),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Grants
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/bitrix24/permissions/check - Whether a portal user may sign in
pub async fn check_grant(
    State(handlers): State<PermissionHandlers>,
    Query(params): Query<CheckGrantParams>,
) -> Result<impl IntoResponse, AccessApiError> {
    let (portal, user_id) = params.validate().map_err(|e| AccessApiError(e.into()))?;

    let role = handlers
        .check_handler
        .handle(CheckGrantQuery { portal, user_id })
        .await?;

    Ok(Json(CheckGrantResponse {
        has_permission: role.is_some(),
        role,
    }))
}

/// GET /api/bitrix24/permissions/list - Grants of the caller's portal
pub async fn list_grants(
    State(handlers): State<PermissionHandlers>,
    RequireAuth(caller): RequireAuth,
    Query(params): Query<ListGrantsParams>,
) -> Result<impl IntoResponse, AccessApiError> {
    let portal = params.validate().map_err(|e| AccessApiError(e.into()))?;

    let grants = handlers
        .list_handler
        .handle(ListGrantsQuery { caller, portal })
        .await?;

    Ok(Json(ListGrantsResponse {
        permissions: grants.into_iter().map(GrantResponse::from).collect(),
    }))
}

/// POST /api/bitrix24/permissions/add - Grant or change a role
pub async fn grant_role(
    State(handlers): State<PermissionHandlers>,
    RequireAuth(caller): RequireAuth,
    body: Result<Json<GrantRoleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let Json(req) = body.map_err(|rejection| validation_error(rejection.body_text()))?;
    let input = req
        .validate()
        .map_err(|e| AccessApiError(e.into()).into_response())?;

    let grant = handlers
        .grant_handler
        .handle(GrantRoleCommand {
            caller,
            portal: input.portal,
            user_id: input.user_id,
            user_name: input.user_name,
            role: input.role,
        })
        .await
        .map_err(|e| AccessApiError(e).into_response())?;

    Ok(Json(GrantResponse::from(grant)))
}

/// DELETE /api/bitrix24/permissions/remove - Revoke a user's grant
pub async fn revoke_grant(
    State(handlers): State<PermissionHandlers>,
    RequireAuth(caller): RequireAuth,
    body: Result<Json<RevokeGrantRequest>, JsonRejection>,
) -> Result<StatusCode, Response> {
    let Json(req) = body.map_err(|rejection| validation_error(rejection.body_text()))?;
    let (portal, user_id) = req
        .validate()
        .map_err(|e| AccessApiError(e.into()).into_response())?;

    handlers
        .revoke_handler
        .handle(RevokeGrantCommand {
            caller,
            portal,
            user_id,
        })
        .await
        .map_err(|e| AccessApiError(e).into_response())?;

    Ok(StatusCode::NO_CONTENT)
}

fn validation_error(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(message, "VALIDATION_FAILED")),
    )
        .into_response()
}
