//! Application router: every endpoint, its middleware, and the base path.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::auth::JwtTokenService;
use crate::config::ServerConfig;
use crate::ports::{
    ConferenceProvider, ConferenceRepository, GrantRepository, PortalDirectory, SessionValidator,
};

use super::conference::{conference_routes, ConferenceHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::permissions::{permission_routes, PermissionHandlers};
use super::portal::{portal_routes, PortalHandlers};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "telemost-bitrix-app";

/// Everything the router needs, already constructed.
#[derive(Clone)]
pub struct AppState {
    pub conference_repository: Arc<dyn ConferenceRepository>,
    pub conference_provider: Arc<dyn ConferenceProvider>,
    /// Who may sign in, and with which role.
    pub grant_repository: Arc<dyn GrantRepository>,
    pub portal_directory: Arc<dyn PortalDirectory>,
    /// Validates bearer tokens on protected routes.
    pub session_validator: Arc<dyn SessionValidator>,
    /// Issues tokens on the permissions endpoints.
    pub token_service: Arc<JwtTokenService>,
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    base_path: String,
}

async fn health(State(base_path): State<String>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        base_path,
    })
}

/// Builds the complete application router.
///
/// # Routes (relative to `server.base_path`)
///
/// - `GET /health`
/// - `POST /api/bitrix24/permissions/{auth,refresh}`, `GET .../check`
/// - `GET .../list`, `POST .../add`, `DELETE .../remove` (admins)
/// - `GET|POST /api/conferences`, `GET|PUT|DELETE /api/conferences/:id`
/// - `GET /api/bitrix/users`, `GET /api/current-user`, `GET /api/users/current`
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let base_path = server.normalized_base_path();
    let auth_state: AuthState = state.session_validator.clone();

    // Bearer-protected routes. The permissions router guards its own
    // management endpoints.
    let protected = Router::new()
        .nest(
            "/conferences",
            conference_routes(ConferenceHandlers::new(
                state.conference_repository.clone(),
                state.conference_provider.clone(),
            )),
        )
        .merge(portal_routes(PortalHandlers::new(
            state.portal_directory.clone(),
        )))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .nest(
            "/bitrix24/permissions",
            permission_routes(
                PermissionHandlers::new(
                    state.token_service.clone(),
                    state.grant_repository.clone(),
                    &base_path,
                ),
                auth_state,
            ),
        )
        .merge(protected);

    let app = Router::new()
        .route("/health", get(health).with_state(base_path.clone()))
        .nest("/api", api);

    let app = if base_path.is_empty() {
        app
    } else {
        Router::new().nest(&base_path, app)
    };

    app.layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
