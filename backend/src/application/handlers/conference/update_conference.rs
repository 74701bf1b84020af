//! UpdateConferenceHandler - Command handler for editing a conference.
//!
//! Only kind, co-hosts and live-stream texts are known to the provider; other
//! edits are local. When the provider cannot edit meetings in place, the
//! meeting is recreated and the record is pointed at the new link.

use std::sync::Arc;

use crate::domain::conference::{Conference, ConferenceError, ConferencePatch};
use crate::domain::foundation::{ConferenceId, Timestamp, UserId};
use crate::ports::{
    ConferenceProvider, ConferenceRepository, MeetingSpec, ProviderError, ProviderMeeting,
};

/// Command to patch a conference owned by the caller.
#[derive(Debug, Clone)]
pub struct UpdateConferenceCommand {
    pub owner: UserId,
    pub conference_id: ConferenceId,
    pub patch: ConferencePatch,
}

/// Handler for updating conferences.
pub struct UpdateConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
    provider: Arc<dyn ConferenceProvider>,
}

impl UpdateConferenceHandler {
    pub fn new(
        repository: Arc<dyn ConferenceRepository>,
        provider: Arc<dyn ConferenceProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    pub async fn handle(&self, cmd: UpdateConferenceCommand) -> Result<Conference, ConferenceError> {
        // 1. Load the owned record
        let mut conference = self
            .repository
            .get(cmd.conference_id, &cmd.owner)
            .await?
            .ok_or_else(|| ConferenceError::not_found(cmd.conference_id))?;

        // 2. Compute and validate the next state
        let details = conference.details.patched(&cmd.patch);
        details.validate()?;

        // 3. Sync the provider when it cares; a failure here leaves the record as is
        if conference.details.differs_for_provider(&details) {
            let spec = MeetingSpec::from_details(&details);
            let meeting = match self
                .provider
                .update_meeting(&conference.provider_id, &spec)
                .await
            {
                Ok(meeting) => meeting,
                Err(ProviderError::Unsupported) => {
                    self.recreate(&conference.provider_id, &spec).await?
                }
                Err(err) => return Err(err.into()),
            };
            conference.relink(meeting.provider_id, meeting.link, meeting.stream_link);
        }

        // 4. Persist
        conference.apply(details, cmd.patch.status.clone(), Timestamp::now());
        self.repository.update(&conference).await.map_err(|err| {
            tracing::error!(
                conference_id = %conference.id,
                provider_id = %conference.provider_id,
                error = %err,
                "Conference update not stored"
            );
            ConferenceError::from(err)
        })?;

        tracing::info!(
            conference_id = %conference.id,
            owner_id = %conference.owner_id,
            "Conference updated"
        );
        Ok(conference)
    }

    /// Replaces a meeting that cannot be edited: create the new one, then
    /// drop the old one.
    async fn recreate(
        &self,
        old_provider_id: &str,
        spec: &MeetingSpec,
    ) -> Result<ProviderMeeting, ConferenceError> {
        let meeting = self.provider.create_meeting(spec).await?;

        match self.provider.delete_meeting(old_provider_id).await {
            Ok(()) | Err(ProviderError::NotFound) => {}
            Err(err) => tracing::warn!(
                provider_id = old_provider_id,
                error = %err,
                "Replaced meeting could not be deleted"
            ),
        }

        Ok(meeting)
    }
}
