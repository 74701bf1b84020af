//! GetConferenceHandler - Query handler for a single conference.

use std::sync::Arc;

use crate::domain::conference::{Conference, ConferenceError};
use crate::domain::foundation::{ConferenceId, UserId};
use crate::ports::ConferenceRepository;

/// Query to get a conference by ID.
#[derive(Debug, Clone)]
pub struct GetConferenceQuery {
    pub owner: UserId,
    pub conference_id: ConferenceId,
}

/// Handler for retrieving a conference.
pub struct GetConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
}

impl GetConferenceHandler {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetConferenceQuery) -> Result<Conference, ConferenceError> {
        self.repository
            .get(query.conference_id, &query.owner)
            .await?
            .ok_or_else(|| ConferenceError::not_found(query.conference_id))
    }
}
