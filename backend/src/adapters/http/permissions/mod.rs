//! HTTP adapter for session tokens and portal grants.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckGrantResponse, GrantResponse, IssueTokenRequest, ListGrantsResponse, TokenResponse,
    TokenUser,
};
pub use handlers::PermissionHandlers;
pub use routes::permission_routes;
