//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Token issue and validation (JWT)
//! - `bitrix` - Bitrix24 portal directory via inbound webhook
//! - `http` - axum routes, handlers and middleware
//! - `sqlite` - Conference store
//! - `telemost` - Yandex Telemost conference provider

pub mod auth;
pub mod bitrix;
pub mod http;
pub mod sqlite;
pub mod telemost;

pub use auth::{JwtTokenService, MockSessionValidator};
pub use bitrix::BitrixClient;
pub use sqlite::{SqliteConferenceRepository, SqliteGrantRepository};
pub use telemost::{MockConferenceProvider, TelemostClient};
