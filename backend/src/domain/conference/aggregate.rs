//! Conference record and the value objects used to create, patch and filter it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConferenceId, Timestamp, UserId, ValidationError};

use super::ConferenceKind;

/// Status given to every freshly created conference.
pub const DEFAULT_STATUS: &str = "scheduled";

/// Longest accepted conference name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// User-editable part of a conference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConferenceDetails {
    pub name: String,
    pub kind: ConferenceKind,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub cohosts: Vec<String>,
    pub create_calendar_event: bool,
    pub invite_users: bool,
    pub live_stream_title: Option<String>,
    pub live_stream_description: Option<String>,
}

impl ConferenceDetails {
    /// Checks the invariants that hold for any stored conference.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Applies a patch and returns the resulting details.
    pub fn patched(&self, patch: &ConferencePatch) -> ConferenceDetails {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(kind) = patch.kind {
            next.kind = kind;
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(start_date) = patch.start_date {
            next.start_date = start_date;
        }
        if let Some(start_time) = patch.start_time {
            next.start_time = start_time;
        }
        if let Some(cohosts) = &patch.cohosts {
            next.cohosts = cohosts.clone();
        }
        if let Some(flag) = patch.create_calendar_event {
            next.create_calendar_event = flag;
        }
        if let Some(flag) = patch.invite_users {
            next.invite_users = flag;
        }
        if let Some(title) = &patch.live_stream_title {
            next.live_stream_title = title.clone();
        }
        if let Some(description) = &patch.live_stream_description {
            next.live_stream_description = description.clone();
        }
        next
    }

    /// True when the provider-side meeting has to change to match `other`.
    ///
    /// Only the kind, the co-host list and the live-stream texts are known to
    /// the provider; everything else is local metadata.
    pub fn differs_for_provider(&self, other: &ConferenceDetails) -> bool {
        self.kind != other.kind
            || self.cohosts != other.cohosts
            || (other.kind.is_broadcast()
                && (self.live_stream_title != other.live_stream_title
                    || self.live_stream_description != other.live_stream_description))
    }

    /// Co-host entries the provider can address, i.e. e-mail addresses.
    pub fn provider_cohosts(&self) -> Vec<String> {
        self.cohosts
            .iter()
            .map(|c| c.trim())
            .filter(|c| c.contains('@'))
            .map(str::to_string)
            .collect()
    }
}

/// A conference known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub id: ConferenceId,
    pub details: ConferenceDetails,
    pub owner_id: UserId,
    pub owner_name: String,
    pub provider_id: String,
    pub link: String,
    pub stream_link: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conference {
    /// Replaces the editable state and advances `updated_at`.
    pub fn apply(&mut self, details: ConferenceDetails, status: Option<String>, now: Timestamp) {
        self.details = details;
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = now.strictly_after(&self.updated_at);
    }

    /// Points the record at a (possibly new) provider meeting.
    pub fn relink(&mut self, provider_id: String, link: String, stream_link: Option<String>) {
        self.provider_id = provider_id;
        self.link = link;
        self.stream_link = stream_link;
    }
}

/// Everything needed to insert a conference; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConference {
    pub details: ConferenceDetails,
    pub owner_id: UserId,
    pub owner_name: String,
    pub provider_id: String,
    pub link: String,
    pub stream_link: Option<String>,
    pub status: String,
}

/// Partial update. `None` leaves a field alone; `Some(None)` clears an
/// optional one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferencePatch {
    pub name: Option<String>,
    pub kind: Option<ConferenceKind>,
    pub description: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<NaiveTime>>,
    pub cohosts: Option<Vec<String>>,
    pub create_calendar_event: Option<bool>,
    pub invite_users: Option<bool>,
    pub live_stream_title: Option<Option<String>>,
    pub live_stream_description: Option<Option<String>>,
    pub status: Option<String>,
}

/// Optional narrowing for owner listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceFilter {
    pub kind: Option<ConferenceKind>,
    pub status: Option<String>,
}

/// Validates a conference name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::invalid_format(
            "name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` start date.
pub fn parse_start_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_format("start_date", "expected YYYY-MM-DD"))
}

/// Parses an `HH:MM` or `HH:MM:SS` start time.
pub fn parse_start_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ValidationError::invalid_format("start_time", "expected HH:MM"))
}
