//! HTTP adapters - REST API implementations.
//!
//! Each area has its own adapter module; `router` assembles them under the
//! configured base path.

pub mod conference;
pub mod error;
pub mod middleware;
pub mod permissions;
pub mod portal;
pub mod router;

// Re-export key types for convenience
pub use error::{AccessApiError, ConferenceApiError, ErrorResponse, PortalApiError};
pub use router::{build_router, AppState, SERVICE_NAME};
