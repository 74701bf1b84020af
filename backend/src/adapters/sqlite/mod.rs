//! SQLite adapters - Database implementations for repository ports.
//!
//! - `SqliteConferenceRepository` - Owner-scoped conference persistence
//! - `SqliteGrantRepository` - Portal grants keyed by portal and user
//! - `connect` - Pool construction with migrations

mod conference_repository;
mod grant_repository;
mod pool;

pub use conference_repository::SqliteConferenceRepository;
pub use grant_repository::SqliteGrantRepository;
pub use pool::{connect, connect_in_memory, migrate};
