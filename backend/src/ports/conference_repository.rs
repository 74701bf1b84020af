//! Conference repository port.
//!
//! Defines the contract for persisting conference records. Every operation is
//! scoped to the requesting owner: a record owned by someone else behaves
//! exactly like a missing one.
//!
//! # Example
//!
//! ```ignore
//! async fn rename(
//!     repo: &dyn ConferenceRepository,
//!     id: ConferenceId,
//!     owner: &UserId,
//! ) -> Result<(), DomainError> {
//!     let mut conference = repo
//!         .get(id, owner)
//!         .await?
//!         .ok_or_else(|| DomainError::new(ErrorCode::ConferenceNotFound, "Conference not found"))?;
//!
//!     let mut details = conference.details.clone();
//!     details.name = "Renamed".to_string();
//!     conference.apply(details, None, Timestamp::now());
//!     repo.update(&conference).await
//! }
//! ```

use crate::domain::conference::{Conference, ConferenceFilter, NewConference};
use crate::domain::foundation::{ConferenceId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for conference persistence.
#[async_trait]
pub trait ConferenceRepository: Send + Sync {
    /// Insert a new record; the store assigns id and timestamps.
    ///
    /// # Errors
    ///
    /// - `DuplicateLink` if the link is already stored
    /// - `DatabaseError` on persistence failure
    async fn create(&self, conference: &NewConference) -> Result<Conference, DomainError>;

    /// Find a conference by id, visible only to its owner.
    ///
    /// Returns `None` when missing or owned by someone else.
    async fn get(&self, id: ConferenceId, owner: &UserId)
        -> Result<Option<Conference>, DomainError>;

    /// List the owner's conferences, most recent first.
    async fn list(
        &self,
        owner: &UserId,
        filter: &ConferenceFilter,
    ) -> Result<Vec<Conference>, DomainError>;

    /// Overwrite all mutable columns of an owned record.
    ///
    /// # Errors
    ///
    /// - `ConferenceNotFound` if no owned row matched
    /// - `DuplicateLink` if a relinked meeting collides with another row
    /// - `DatabaseError` on persistence failure
    async fn update(&self, conference: &Conference) -> Result<(), DomainError>;

    /// Delete an owned record.
    ///
    /// # Errors
    ///
    /// - `ConferenceNotFound` if no owned row matched
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: ConferenceId, owner: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ConferenceRepository) {}
    }

    #[test]
    fn conference_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConferenceRepository>();
    }
}
