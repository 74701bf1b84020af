//! HTTP adapter for the portal user directory.

mod handlers;

use axum::{routing::get, Router};

pub use handlers::PortalHandlers;

use handlers::{current_user, list_users};

/// Creates the portal router; mounted at `/api`.
pub fn portal_routes(handlers: PortalHandlers) -> Router {
    Router::new()
        .route("/bitrix/users", get(list_users))
        .route("/current-user", get(current_user))
        .route("/users/current", get(current_user))
        .with_state(handlers)
}
