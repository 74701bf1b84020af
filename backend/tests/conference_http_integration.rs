//! Integration tests for the full HTTP surface.
//!
//! These tests drive the assembled router end to end:
//! 1. Token issue, expiry and refresh through the cookie
//! 2. Portal grants gating sign-in and refresh, and their management
//! 3. Conference CRUD against an in-memory store and a mock provider
//! 4. A stalled Telemost behind the real client
//! 5. Owner scoping, error mapping and base-path mounting

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use telemost_bridge::adapters::auth::JwtTokenService;
use telemost_bridge::adapters::bitrix::BitrixClient;
use telemost_bridge::adapters::http::{build_router, AppState};
use telemost_bridge::adapters::sqlite::{
    connect_in_memory, SqliteConferenceRepository, SqliteGrantRepository,
};
use telemost_bridge::adapters::telemost::{
    MockConferenceProvider, ProviderCall, TelemostClient, TelemostClientConfig,
};
use telemost_bridge::config::ServerConfig;
use telemost_bridge::domain::access::{PortalDomain, PortalGrant};
use telemost_bridge::domain::foundation::{AuthenticatedUser, Role, UserId};
use telemost_bridge::ports::{ConferenceProvider, GrantRepository, ProviderError};

const ACCESS_SECRET: &str = "integration-access-secret";
const REFRESH_SECRET: &str = "integration-refresh-secret";
const DOMAIN: &str = "company.bitrix24.ru";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    provider: MockConferenceProvider,
    grants: Arc<SqliteGrantRepository>,
    base: String,
}

async fn assemble(
    server: &ServerConfig,
    conference_provider: Arc<dyn ConferenceProvider>,
) -> (Router, Arc<SqliteGrantRepository>) {
    let tokens = Arc::new(JwtTokenService::new(
        ACCESS_SECRET,
        REFRESH_SECRET,
        3600,
        604800,
    ));
    let grants = Arc::new(SqliteGrantRepository::new(
        connect_in_memory().await.unwrap(),
    ));
    let state = AppState {
        conference_repository: Arc::new(SqliteConferenceRepository::new(
            connect_in_memory().await.unwrap(),
        )),
        conference_provider,
        grant_repository: grants.clone(),
        portal_directory: Arc::new(BitrixClient::new(None, Duration::from_secs(5)).unwrap()),
        session_validator: tokens.clone(),
        token_service: tokens,
    };

    (build_router(state, server), grants)
}

async fn test_app_with_base(base_path: &str) -> TestApp {
    let provider = MockConferenceProvider::new();
    let server = ServerConfig {
        base_path: base_path.to_string(),
        ..Default::default()
    };
    let (router, grants) = assemble(&server, Arc::new(provider.clone())).await;

    TestApp {
        router,
        provider,
        grants,
        base: server.normalized_base_path(),
    }
}

async fn test_app() -> TestApp {
    test_app_with_base("").await
}

struct TestResponse {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{}{}", self.base, path));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Writes a grant straight to the store.
    async fn grant(&self, user_id: &str, role: Role) {
        self.grants
            .save(&PortalGrant::new(
                PortalDomain::new(DOMAIN).unwrap(),
                UserId::new(user_id).unwrap(),
                None,
                role,
                None,
            ))
            .await
            .unwrap();
    }

    /// Logs a portal user in and returns (access token, refresh cookie pair).
    ///
    /// Users without a grant are made observers first.
    async fn login(&self, user_id: &str) -> (String, String) {
        let known = self
            .grants
            .find(
                &PortalDomain::new(DOMAIN).unwrap(),
                &UserId::new(user_id).unwrap(),
            )
            .await
            .unwrap();
        if known.is_none() {
            self.grant(user_id, Role::Observer).await;
        }

        let response = self
            .call(
                Method::POST,
                "/api/bitrix24/permissions/auth",
                None,
                Some(json!({
                    "domain": DOMAIN,
                    "user_id": user_id,
                    "user_name": format!("User {}", user_id),
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        let token = response.body["accessToken"].as_str().unwrap().to_string();
        let cookie = response
            .set_cookie
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        (token, cookie)
    }

    async fn refresh(&self, cookie: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/api/bitrix24/permissions/refresh", self.base))
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn create(&self, token: &str, body: Value) -> TestResponse {
        self.call(Method::POST, "/api/conferences", Some(token), Some(body))
            .await
    }
}

fn standup() -> Value {
    json!({ "name": "Standup", "kind": "conference", "cohosts": ["anna@example.com"] })
}

// =============================================================================
// Health and mounting
// =============================================================================

#[tokio::test]
async fn health_reports_service_and_base_path() {
    let app = test_app_with_base("/telemost/").await;

    let response = app.call(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["service"], "telemost-bitrix-app");
    assert_eq!(response.body["base_path"], "/telemost");
}

#[tokio::test]
async fn routes_are_only_served_under_base_path() {
    let app = test_app_with_base("/telemost").await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_cookie_is_scoped_to_base_api_path() {
    let app = test_app_with_base("/telemost").await;
    app.grant("17", Role::Observer).await;

    let response = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/auth",
            None,
            Some(json!({
                "domain": DOMAIN,
                "userId": 17,
                "userName": "Ivan",
                "email": "ivan@example.com",
            })),
        )
        .await;

    let cookie = response.set_cookie.unwrap();
    assert!(cookie.contains("Path=/telemost/api"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=None"));
    assert_eq!(response.body["user"]["id"], "17");
    assert_eq!(response.body["user"]["email"], "ivan@example.com");
    assert_eq!(response.body["user"]["role"], "observer");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn conference_routes_require_a_token() {
    let app = test_app().await;

    let response = app.call(Method::GET, "/api/conferences", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn expired_token_is_refreshed_through_cookie() {
    let app = test_app().await;
    let (_, cookie) = app.login("17").await;

    let expired = JwtTokenService::new(ACCESS_SECRET, REFRESH_SECRET, -60, 604800)
        .issue_access(
            &AuthenticatedUser::new(UserId::new("17").unwrap(), "User 17", None)
                .with_grant(DOMAIN, Role::Observer),
        )
        .unwrap();

    let rejected = app
        .call(Method::GET, "/api/conferences", Some(&expired), None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.body["code"], "TOKEN_EXPIRED");

    // An expired bearer header must not block the refresh itself.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bitrix24/permissions/refresh")
        .header(header::AUTHORIZATION, format!("Bearer {}", expired))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let refreshed = app.send(request).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["user"]["id"], "17");
    assert!(refreshed.set_cookie.is_none());

    let fresh = refreshed.body["accessToken"].as_str().unwrap();
    let retried = app
        .call(Method::GET, "/api/conferences", Some(fresh), None)
        .await;
    assert_eq!(retried.status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_cookie_fails() {
    let app = test_app().await;

    let response = app
        .call(Method::POST, "/api/bitrix24/permissions/refresh", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bitrix24/permissions/refresh")
        .header(header::COOKIE, format!("refreshToken={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn auth_requires_user_id() {
    let app = test_app().await;

    let response = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/auth",
            None,
            Some(json!({ "domain": DOMAIN, "user_name": "Nobody" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Portal grants
// =============================================================================

#[tokio::test]
async fn auth_without_grant_is_forbidden() {
    let app = test_app().await;

    let response = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/auth",
            None,
            Some(json!({ "domain": DOMAIN, "user_id": "17" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["code"], "NO_PERMISSION");
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn grant_on_another_portal_does_not_admit() {
    let app = test_app().await;
    app.grant("17", Role::Admin).await;

    let response = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/auth",
            None,
            Some(json!({ "domain": "other.bitrix24.ru", "user_id": "17" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn revoked_grant_blocks_refresh() {
    let app = test_app().await;
    app.grant("1", Role::Admin).await;
    let (admin, _) = app.login("1").await;
    let (_, cookie) = app.login("17").await;

    let removed = app
        .call(
            Method::DELETE,
            "/api/bitrix24/permissions/remove",
            Some(&admin),
            Some(json!({ "user_id": "17" })),
        )
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let refreshed = app.refresh(&cookie).await;
    assert_eq!(refreshed.status, StatusCode::FORBIDDEN);
    assert_eq!(refreshed.body["code"], "PERMISSION_REVOKED");
}

#[tokio::test]
async fn refresh_carries_current_role() {
    let app = test_app().await;
    app.grant("1", Role::Admin).await;
    let (admin, _) = app.login("1").await;
    let (_, cookie) = app.login("17").await;

    let promoted = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/add",
            Some(&admin),
            Some(json!({ "user_id": 17, "user_name": "Ivan", "role": "admin" })),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["granted_by"], "1");

    let refreshed = app.refresh(&cookie).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["user"]["role"], "admin");
}

#[tokio::test]
async fn check_is_public() {
    let app = test_app().await;
    app.grant("17", Role::Observer).await;

    let granted = app
        .call(
            Method::GET,
            &format!("/api/bitrix24/permissions/check?domain={}&user_id=17", DOMAIN),
            None,
            None,
        )
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.body, json!({ "hasPermission": true, "role": "observer" }));

    let unknown = app
        .call(
            Method::GET,
            &format!("/api/bitrix24/permissions/check?domain={}&user_id=99", DOMAIN),
            None,
            None,
        )
        .await;
    assert_eq!(unknown.body["hasPermission"], false);

    let incomplete = app
        .call(Method::GET, "/api/bitrix24/permissions/check", None, None)
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_manages_portal_grants() {
    let app = test_app().await;
    app.grant("1", Role::Admin).await;
    let (admin, _) = app.login("1").await;

    let added = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/add",
            Some(&admin),
            Some(json!({ "domain": DOMAIN, "userId": "30", "role": "observer" })),
        )
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body["domain"], DOMAIN);

    let listed = app
        .call(Method::GET, "/api/bitrix24/permissions/list", Some(&admin), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let ids: Vec<&str> = listed.body["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|grant| grant["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "30"]);

    let bad_role = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/add",
            Some(&admin),
            Some(json!({ "user_id": "31", "role": "owner" })),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

    let missing = app
        .call(
            Method::DELETE,
            "/api/bitrix24/permissions/remove",
            Some(&admin),
            Some(json!({ "user_id": "99" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], "GRANT_NOT_FOUND");
}

#[tokio::test]
async fn observers_cannot_manage_grants() {
    let app = test_app().await;
    let (observer, _) = app.login("17").await;

    let listed = app
        .call(Method::GET, "/api/bitrix24/permissions/list", Some(&observer), None)
        .await;
    assert_eq!(listed.status, StatusCode::FORBIDDEN);
    assert_eq!(listed.body["code"], "ADMIN_REQUIRED");

    let added = app
        .call(
            Method::POST,
            "/api/bitrix24/permissions/add",
            Some(&observer),
            Some(json!({ "user_id": "17", "role": "admin" })),
        )
        .await;
    assert_eq!(added.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_manage_another_portal() {
    let app = test_app().await;
    app.grant("1", Role::Admin).await;
    let (admin, _) = app.login("1").await;

    let listed = app
        .call(
            Method::GET,
            "/api/bitrix24/permissions/list?domain=other.bitrix24.ru",
            Some(&admin),
            None,
        )
        .await;

    assert_eq!(listed.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn grant_management_requires_a_token() {
    let app = test_app().await;

    let response = app
        .call(Method::GET, "/api/bitrix24/permissions/list", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Conference lifecycle
// =============================================================================

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let created = app.create(&token, standup()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["owner_id"], "17");
    assert_eq!(created.body["status"], "scheduled");

    let id = created.body["id"].as_i64().unwrap();
    let fetched = app
        .call(Method::GET, &format!("/api/conferences/{}", id), Some(&token), None)
        .await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "Standup");
    assert_eq!(fetched.body["kind"], "conference");
    assert_eq!(fetched.body["link"], created.body["link"]);
}

#[tokio::test]
async fn owner_in_body_is_ignored() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let created = app
        .create(
            &token,
            json!({ "name": "Standup", "kind": "conference", "owner_id": "99" }),
        )
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["owner_id"], "17");
}

#[tokio::test]
async fn other_owners_conferences_are_invisible() {
    let app = test_app().await;
    let (alice, _) = app.login("17").await;
    let (bob, _) = app.login("18").await;

    let created = app.create(&alice, standup()).await;
    let path = format!("/api/conferences/{}", created.body["id"]);

    let fetched = app.call(Method::GET, &path, Some(&bob), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["code"], "CONFERENCE_NOT_FOUND");

    let updated = app
        .call(Method::PUT, &path, Some(&bob), Some(json!({ "name": "Hijacked" })))
        .await;
    assert_eq!(updated.status, StatusCode::NOT_FOUND);

    let deleted = app.call(Method::DELETE, &path, Some(&bob), None).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);

    let listed = app
        .call(Method::GET, "/api/conferences", Some(&bob), None)
        .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn invalid_kind_never_reaches_provider() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let response = app
        .create(&token, json!({ "name": "Standup", "kind": "webinar" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_FAILED");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/conferences")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn provider_outage_stores_nothing() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;
    app.provider.push_error(ProviderError::unavailable("timeout"));

    let response = app.create(&token, standup()).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["code"], "PROVIDER_UNAVAILABLE");

    let listed = app
        .call(Method::GET, "/api/conferences", Some(&token), None)
        .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn stalled_telemost_reports_unavailable_before_request_timeout() {
    // Telemost that never answers within the client's per-attempt timeout.
    let stalled = Router::new().route(
        "/conferences",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "{}"
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stalled).await.unwrap();
    });

    let client = TelemostClient::new(
        TelemostClientConfig::new("y0_test")
            .with_base_url(format!("http://{}", addr))
            .with_timeout(Duration::from_millis(200))
            .with_max_retries(5)
            .with_retry_backoff(Duration::from_millis(50))
            .with_deadline(Duration::from_millis(700)),
    )
    .unwrap();
    let server = ServerConfig {
        request_timeout_secs: 2,
        ..Default::default()
    };
    let (router, grants) = assemble(&server, Arc::new(client)).await;
    let app = TestApp {
        router,
        provider: MockConferenceProvider::new(),
        grants,
        base: server.normalized_base_path(),
    };
    let (token, _) = app.login("17").await;

    let response = app.create(&token, standup()).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["code"], "PROVIDER_UNAVAILABLE");

    let listed = app
        .call(Method::GET, "/api/conferences", Some(&token), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn provider_rate_limit_maps_to_429() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;
    app.provider.push_error(ProviderError::rate_limited(30));

    let response = app.create(&token, standup()).await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["code"], "PROVIDER_RATE_LIMITED");
}

#[tokio::test]
async fn update_changes_field_and_advances_updated_at() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;
    let created = app.create(&token, standup()).await;
    let path = format!("/api/conferences/{}", created.body["id"]);

    let updated = app
        .call(
            Method::PUT,
            &path,
            Some(&token),
            Some(json!({ "description": "Daily sync" })),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["description"], "Daily sync");
    assert_eq!(updated.body["name"], "Standup");
    assert_eq!(updated.body["link"], created.body["link"]);
    assert_eq!(updated.body["created_at"], created.body["created_at"]);
    assert_ne!(updated.body["updated_at"], created.body["updated_at"]);
    // Description is not a provider field.
    assert_eq!(app.provider.call_count(), 1);
}

#[tokio::test]
async fn list_filters_by_kind_and_orders_newest_first() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;
    app.create(&token, standup()).await;
    app.create(
        &token,
        json!({ "name": "Town hall", "kind": "broadcast", "live_stream_title": "Q1" }),
    )
    .await;

    let all = app
        .call(Method::GET, "/api/conferences", Some(&token), None)
        .await;
    assert_eq!(all.body[0]["name"], "Town hall");
    assert_eq!(all.body[1]["name"], "Standup");
    assert!(all.body[0]["stream_link"].is_string());

    let broadcasts = app
        .call(Method::GET, "/api/conferences?kind=broadcast", Some(&token), None)
        .await;
    assert_eq!(broadcasts.body.as_array().unwrap().len(), 1);

    let bad = app
        .call(Method::GET, "/api/conferences?kind=webinar", Some(&token), None)
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_tolerates_meeting_already_gone() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;
    let created = app.create(&token, standup()).await;
    let path = format!("/api/conferences/{}", created.body["id"]);
    app.provider.push_error(ProviderError::NotFound);

    let deleted = app.call(Method::DELETE, &path, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(matches!(
        app.provider.calls().last(),
        Some(ProviderCall::Delete(_))
    ));

    let fetched = app.call(Method::GET, &path, Some(&token), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let response = app
        .call(Method::GET, "/api/conferences/abc", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Portal pass-through
// =============================================================================

#[tokio::test]
async fn portal_endpoints_without_webhook() {
    let app = test_app().await;
    let (token, _) = app.login("17").await;

    let users = app
        .call(Method::GET, "/api/bitrix/users", Some(&token), None)
        .await;
    assert_eq!(users.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(users.body["code"], "PORTAL_NOT_CONFIGURED");

    for path in ["/api/current-user", "/api/users/current"] {
        let current = app.call(Method::GET, path, Some(&token), None).await;
        assert_eq!(current.status, StatusCode::OK);
        assert_eq!(current.body[0]["ID"], "17");
    }
}
