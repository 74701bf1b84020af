//! DeleteConferenceHandler - Command handler for removing a conference.

use std::sync::Arc;

use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, UserId};
use crate::ports::{ConferenceProvider, ConferenceRepository, ProviderError};

/// Command to delete a conference owned by the caller.
#[derive(Debug, Clone)]
pub struct DeleteConferenceCommand {
    pub owner: UserId,
    pub conference_id: ConferenceId,
}

/// Handler for deleting conferences.
pub struct DeleteConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
    provider: Arc<dyn ConferenceProvider>,
}

impl DeleteConferenceHandler {
    pub fn new(
        repository: Arc<dyn ConferenceRepository>,
        provider: Arc<dyn ConferenceProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    pub async fn handle(&self, cmd: DeleteConferenceCommand) -> Result<(), ConferenceError> {
        let conference = self
            .repository
            .get(cmd.conference_id, &cmd.owner)
            .await?
            .ok_or_else(|| ConferenceError::not_found(cmd.conference_id))?;

        // A meeting already gone on the provider side still lets the record go.
        match self.provider.delete_meeting(&conference.provider_id).await {
            Ok(()) | Err(ProviderError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        self.repository.delete(conference.id, &cmd.owner).await?;

        tracing::info!(
            conference_id = %conference.id,
            owner_id = %cmd.owner,
            "Conference deleted"
        );
        Ok(())
    }
}
