//! ListConferencesHandler - Query handler for the caller's conferences.

use std::sync::Arc;

use crate::domain::conference::{Conference, ConferenceError, ConferenceFilter};
use crate::domain::foundation::UserId;
use crate::ports::ConferenceRepository;

/// Query to list the caller's conferences, most recent first.
#[derive(Debug, Clone)]
pub struct ListConferencesQuery {
    pub owner: UserId,
    pub filter: ConferenceFilter,
}

/// Handler for listing conferences.
pub struct ListConferencesHandler {
    repository: Arc<dyn ConferenceRepository>,
}

impl ListConferencesHandler {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListConferencesQuery,
    ) -> Result<Vec<Conference>, ConferenceError> {
        Ok(self.repository.list(&query.owner, &query.filter).await?)
    }
}
