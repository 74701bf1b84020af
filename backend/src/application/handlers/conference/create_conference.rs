//! CreateConferenceHandler - Command handler for creating conferences.

use std::sync::Arc;

use crate::domain::conference::{
    Conference, ConferenceDetails, ConferenceError, NewConference, DEFAULT_STATUS,
};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{ConferenceProvider, ConferenceRepository, MeetingSpec};

/// Command to create a conference on behalf of the caller.
#[derive(Debug, Clone)]
pub struct CreateConferenceCommand {
    /// Becomes the owner; never taken from the request body.
    pub owner: AuthenticatedUser,
    pub details: ConferenceDetails,
}

/// Handler for creating conferences.
pub struct CreateConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
    provider: Arc<dyn ConferenceProvider>,
}

impl CreateConferenceHandler {
    pub fn new(
        repository: Arc<dyn ConferenceRepository>,
        provider: Arc<dyn ConferenceProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    pub async fn handle(&self, cmd: CreateConferenceCommand) -> Result<Conference, ConferenceError> {
        // 1. Validate before touching the provider
        cmd.details.validate()?;

        // 2. Create the meeting; its link is what we store
        let meeting = self
            .provider
            .create_meeting(&MeetingSpec::from_details(&cmd.details))
            .await?;

        // 3. Persist
        let record = NewConference {
            details: cmd.details,
            owner_id: cmd.owner.id,
            owner_name: cmd.owner.display_name,
            provider_id: meeting.provider_id,
            link: meeting.link,
            stream_link: meeting.stream_link,
            status: DEFAULT_STATUS.to_string(),
        };

        match self.repository.create(&record).await {
            Ok(conference) => {
                tracing::info!(
                    conference_id = %conference.id,
                    owner_id = %conference.owner_id,
                    provider_id = %conference.provider_id,
                    "Conference created"
                );
                Ok(conference)
            }
            Err(err) => {
                tracing::error!(
                    owner_id = %record.owner_id,
                    provider_id = %record.provider_id,
                    link = %record.link,
                    error = %err,
                    "Provider meeting created but not stored; meeting is orphaned"
                );
                Err(err.into())
            }
        }
    }
}
