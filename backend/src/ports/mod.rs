//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConferenceRepository` - Owner-scoped conference persistence
//! - `ConferenceProvider` - External video-meeting service
//! - `GrantRepository` - Portal grants that admit users to a session
//! - `PortalDirectory` - Bitrix24 user directory lookups
//! - `SessionValidator` - Access-token validation for HTTP middleware

mod conference_provider;
mod conference_repository;
mod grant_repository;
mod portal_directory;
mod session_validator;

pub use conference_provider::{ConferenceProvider, MeetingSpec, ProviderError, ProviderMeeting};
pub use conference_repository::ConferenceRepository;
pub use grant_repository::GrantRepository;
pub use portal_directory::{PortalDirectory, PortalError};
pub use session_validator::SessionValidator;
