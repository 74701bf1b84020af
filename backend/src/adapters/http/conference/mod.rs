//! HTTP adapter for conference endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConferenceResponse, CreateConferenceRequest, ListConferencesParams, UpdateConferenceRequest,
};
pub use handlers::ConferenceHandlers;
pub use routes::conference_routes;
