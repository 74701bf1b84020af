//! HTTP routes for conference endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_conference, delete_conference, get_conference, list_conferences, update_conference,
    ConferenceHandlers,
};

/// Creates the conference router; mounted at `/api/conferences`.
pub fn conference_routes(handlers: ConferenceHandlers) -> Router {
    Router::new()
        .route("/", get(list_conferences).post(create_conference))
        .route(
            "/:id",
            get(get_conference)
                .put(update_conference)
                .delete(delete_conference),
        )
        .with_state(handlers)
}
