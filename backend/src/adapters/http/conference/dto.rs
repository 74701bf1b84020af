//! Request and response shapes for the conference endpoints.
//!
//! Requests deserialize into loosely typed structs; `validate()` turns them
//! into domain values or a `ValidationError` before any handler runs.
//! Field names are snake_case, with camelCase accepted as aliases.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::conference::{
    parse_start_date, parse_start_time, validate_name, Conference, ConferenceDetails,
    ConferenceFilter, ConferenceKind, ConferencePatch,
};
use crate::domain::foundation::{Timestamp, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/conferences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConferenceRequest {
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "startTime")]
    pub start_time: Option<String>,
    pub cohosts: Option<Vec<String>>,
    #[serde(alias = "createCalendarEvent")]
    pub create_calendar_event: Option<bool>,
    #[serde(alias = "inviteUsers")]
    pub invite_users: Option<bool>,
    #[serde(alias = "liveStreamTitle")]
    pub live_stream_title: Option<String>,
    #[serde(alias = "liveStreamDescription")]
    pub live_stream_description: Option<String>,
}

impl CreateConferenceRequest {
    pub fn validate(self) -> Result<ConferenceDetails, ValidationError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        validate_name(&name)?;

        let kind = parse_kind(self.kind.as_deref().ok_or_else(|| {
            ValidationError::empty_field("kind")
        })?)?;

        Ok(ConferenceDetails {
            name,
            kind,
            description: non_blank(self.description),
            start_date: optional_date(self.start_date)?,
            start_time: optional_time(self.start_time)?,
            cohosts: clean_cohosts(self.cohosts.unwrap_or_default()),
            create_calendar_event: self.create_calendar_event.unwrap_or(false),
            invite_users: self.invite_users.unwrap_or(false),
            live_stream_title: non_blank(self.live_stream_title),
            live_stream_description: non_blank(self.live_stream_description),
        })
    }
}

/// Body of `PUT /api/conferences/{id}`. Absent fields stay untouched; an
/// empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConferenceRequest {
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "startTime")]
    pub start_time: Option<String>,
    pub cohosts: Option<Vec<String>>,
    #[serde(alias = "createCalendarEvent")]
    pub create_calendar_event: Option<bool>,
    #[serde(alias = "inviteUsers")]
    pub invite_users: Option<bool>,
    #[serde(alias = "liveStreamTitle")]
    pub live_stream_title: Option<String>,
    #[serde(alias = "liveStreamDescription")]
    pub live_stream_description: Option<String>,
    pub status: Option<String>,
}

impl UpdateConferenceRequest {
    pub fn validate(self) -> Result<ConferencePatch, ValidationError> {
        let name = match self.name {
            Some(name) => {
                validate_name(&name)?;
                Some(name.trim().to_string())
            }
            None => None,
        };

        let status = match self.status {
            Some(status) if status.trim().is_empty() => {
                return Err(ValidationError::empty_field("status"))
            }
            Some(status) => Some(status.trim().to_string()),
            None => None,
        };

        Ok(ConferencePatch {
            name,
            kind: self.kind.as_deref().map(parse_kind).transpose()?,
            description: self.description.map(|raw| non_blank(Some(raw))),
            start_date: self.start_date.map(|raw| optional_date(Some(raw))).transpose()?,
            start_time: self.start_time.map(|raw| optional_time(Some(raw))).transpose()?,
            cohosts: self.cohosts.map(clean_cohosts),
            create_calendar_event: self.create_calendar_event,
            invite_users: self.invite_users,
            live_stream_title: self.live_stream_title.map(|raw| non_blank(Some(raw))),
            live_stream_description: self
                .live_stream_description
                .map(|raw| non_blank(Some(raw))),
            status,
        })
    }
}

/// Query string of `GET /api/conferences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConferencesParams {
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}

impl ListConferencesParams {
    pub fn validate(self) -> Result<ConferenceFilter, ValidationError> {
        Ok(ConferenceFilter {
            kind: non_blank(self.kind)
                .as_deref()
                .map(parse_kind)
                .transpose()?,
            status: non_blank(self.status),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// A stored conference as returned to the iframe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConferenceResponse {
    pub id: i64,
    pub name: String,
    pub kind: ConferenceKind,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub cohosts: Vec<String>,
    pub create_calendar_event: bool,
    pub invite_users: bool,
    pub live_stream_title: Option<String>,
    pub live_stream_description: Option<String>,
    pub owner_id: String,
    pub owner_name: String,
    pub link: String,
    pub stream_link: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Conference> for ConferenceResponse {
    fn from(conference: Conference) -> Self {
        let details = conference.details;
        Self {
            id: conference.id.as_i64(),
            name: details.name,
            kind: details.kind,
            description: details.description,
            start_date: details.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            start_time: details.start_time.map(|t| t.format("%H:%M").to_string()),
            cohosts: details.cohosts,
            create_calendar_event: details.create_calendar_event,
            invite_users: details.invite_users,
            live_stream_title: details.live_stream_title,
            live_stream_description: details.live_stream_description,
            owner_id: conference.owner_id.as_str().to_string(),
            owner_name: conference.owner_name,
            link: conference.link,
            stream_link: conference.stream_link,
            status: conference.status,
            created_at: conference.created_at,
            updated_at: conference.updated_at,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_kind(raw: &str) -> Result<ConferenceKind, ValidationError> {
    raw.trim().parse::<ConferenceKind>().map_err(|_| {
        ValidationError::invalid_format("kind", "must be 'conference' or 'broadcast'")
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn optional_date(raw: Option<String>) -> Result<Option<NaiveDate>, ValidationError> {
    non_blank(raw).as_deref().map(parse_start_date).transpose()
}

fn optional_time(raw: Option<String>) -> Result<Option<NaiveTime>, ValidationError> {
    non_blank(raw).as_deref().map(parse_start_time).transpose()
}

fn clean_cohosts(cohosts: Vec<String>) -> Vec<String> {
    cohosts
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
