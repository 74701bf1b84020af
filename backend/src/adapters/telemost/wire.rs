//! Telemost API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::ports::{MeetingSpec, ProviderMeeting};

/// Everyone with the link joins without waiting for admission.
const WAITING_ROOM_PUBLIC: &str = "PUBLIC";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct ConferenceRequest {
    waiting_room_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    live_stream: Option<LiveStreamRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cohosts: Vec<CohostRequest>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct LiveStreamRequest {
    title: String,
    description: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CohostRequest {
    email: String,
}

impl From<&MeetingSpec> for ConferenceRequest {
    fn from(spec: &MeetingSpec) -> Self {
        let live_stream = spec.kind.is_broadcast().then(|| LiveStreamRequest {
            title: spec.live_stream_title.clone().unwrap_or_default(),
            description: spec.live_stream_description.clone().unwrap_or_default(),
        });

        Self {
            waiting_room_level: WAITING_ROOM_PUBLIC,
            live_stream,
            cohosts: spec
                .cohosts
                .iter()
                .map(|email| CohostRequest {
                    email: email.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ConferenceResponse {
    id: String,
    #[serde(alias = "link")]
    join_url: Option<String>,
    live_stream: Option<LiveStreamResponse>,
}

#[derive(Debug, Deserialize)]
struct LiveStreamResponse {
    watch_url: Option<String>,
}

impl ConferenceResponse {
    /// Maps the body to port types; a body without a join URL is unusable.
    pub(super) fn into_meeting(self) -> Option<ProviderMeeting> {
        let link = self.join_url.filter(|url| !url.is_empty())?;
        Some(ProviderMeeting {
            provider_id: self.id,
            link,
            stream_link: self.live_stream.and_then(|ls| ls.watch_url),
        })
    }
}
