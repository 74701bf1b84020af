//! Conference Provider Port - Interface for the external video-meeting service.
//!
//! The provider issues the join link that the store keeps. Implementations
//! translate between the provider's HTTP API and these types, classify
//! failures into [`ProviderError`], and own their retry policy.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conference::{ConferenceDetails, ConferenceKind};

/// Port for video-meeting provider interactions.
#[async_trait]
pub trait ConferenceProvider: Send + Sync {
    /// Create a meeting and return its identifiers.
    async fn create_meeting(&self, spec: &MeetingSpec) -> Result<ProviderMeeting, ProviderError>;

    /// Change an existing meeting in place.
    ///
    /// Returns `ProviderError::Unsupported` when the provider cannot edit
    /// meetings; callers then recreate it.
    async fn update_meeting(
        &self,
        provider_id: &str,
        spec: &MeetingSpec,
    ) -> Result<ProviderMeeting, ProviderError>;

    /// Delete a meeting. A meeting that is already gone counts as deleted.
    async fn delete_meeting(&self, provider_id: &str) -> Result<(), ProviderError>;
}

/// What the provider needs to know about a meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSpec {
    pub kind: ConferenceKind,
    /// Co-host e-mail addresses.
    pub cohosts: Vec<String>,
    pub live_stream_title: Option<String>,
    pub live_stream_description: Option<String>,
}

impl MeetingSpec {
    /// Builds the provider view of conference details.
    ///
    /// Live-stream texts are dropped for plain conferences and co-hosts that
    /// are not e-mail addresses are left out.
    pub fn from_details(details: &ConferenceDetails) -> Self {
        let broadcast = details.kind.is_broadcast();
        Self {
            kind: details.kind,
            cohosts: details.provider_cohosts(),
            live_stream_title: details
                .live_stream_title
                .clone()
                .filter(|_| broadcast),
            live_stream_description: details
                .live_stream_description
                .clone()
                .filter(|_| broadcast),
        }
    }
}

/// Identifiers of a meeting held by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMeeting {
    pub provider_id: String,
    /// Join URL.
    pub link: String,
    /// Live-stream watch URL, broadcasts only.
    pub stream_link: Option<String>,
}

/// Provider failures, classified for retry and HTTP mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider rejected our credentials.
    #[error("provider authentication failed")]
    Unauthorized,

    /// Provider is throttling us.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider refused the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Meeting does not exist on the provider side.
    #[error("meeting not found")]
    NotFound,

    /// Provider cannot perform this operation.
    #[error("operation not supported by provider")]
    Unsupported,

    /// Provider unreachable, timed out, failed, or answered with garbage.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

impl ProviderError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(ProviderError::unavailable("503").is_retryable());
        assert!(!ProviderError::rate_limited(30).is_retryable());
        assert!(!ProviderError::Unauthorized.is_retryable());
        assert!(!ProviderError::invalid_request("bad").is_retryable());
        assert!(!ProviderError::NotFound.is_retryable());
        assert!(!ProviderError::Unsupported.is_retryable());
    }

    #[test]
    fn spec_drops_stream_texts_for_plain_conferences() {
        let details = ConferenceDetails {
            name: "Sync".to_string(),
            live_stream_title: Some("ignored".to_string()),
            cohosts: vec!["a@example.com".to_string(), "Nobody".to_string()],
            ..Default::default()
        };

        let spec = MeetingSpec::from_details(&details);

        assert_eq!(spec.kind, ConferenceKind::Conference);
        assert_eq!(spec.live_stream_title, None);
        assert_eq!(spec.cohosts, vec!["a@example.com".to_string()]);
    }

    #[test]
    fn spec_keeps_stream_texts_for_broadcasts() {
        let details = ConferenceDetails {
            name: "Town hall".to_string(),
            kind: ConferenceKind::Broadcast,
            live_stream_title: Some("Q3 results".to_string()),
            live_stream_description: Some("Quarterly update".to_string()),
            ..Default::default()
        };

        let spec = MeetingSpec::from_details(&details);

        assert_eq!(spec.live_stream_title.as_deref(), Some("Q3 results"));
        assert_eq!(spec.live_stream_description.as_deref(), Some("Quarterly update"));
    }

    #[test]
    fn rate_limited_displays_retry_after() {
        assert_eq!(
            ProviderError::rate_limited(60).to_string(),
            "rate limited: retry after 60s"
        );
    }

    #[test]
    fn conference_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConferenceProvider>();
    }
}
