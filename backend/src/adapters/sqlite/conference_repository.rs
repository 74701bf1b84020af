//! SQLite implementation of ConferenceRepository.
//!
//! Every statement carries the owner in its WHERE clause, so rows belonging to
//! another user are never read, changed, or removed.

use crate::domain::conference::{
    Conference, ConferenceDetails, ConferenceFilter, ConferenceKind, NewConference,
};
use crate::domain::foundation::{ConferenceId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ConferenceRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;

/// SQLite implementation of the ConferenceRepository port.
pub struct SqliteConferenceRepository {
    pool: SqlitePool,
}

impl SqliteConferenceRepository {
    /// Creates a new repository on the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a conference.
#[derive(Debug, sqlx::FromRow)]
struct ConferenceRow {
    id: i64,
    name: String,
    kind: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    cohosts: String,
    create_calendar_event: bool,
    invite_users: bool,
    live_stream_title: Option<String>,
    live_stream_description: Option<String>,
    owner_id: String,
    owner_name: String,
    provider_id: String,
    link: String,
    stream_link: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ConferenceRow> for Conference {
    type Error = DomainError;

    fn try_from(row: ConferenceRow) -> Result<Self, Self::Error> {
        let kind: ConferenceKind = row.kind.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid kind value: {}", row.kind),
            )
        })?;

        Ok(Conference {
            id: ConferenceId::from_i64(row.id),
            details: ConferenceDetails {
                name: row.name,
                kind,
                description: row.description,
                start_date: row.start_date,
                start_time: row.start_time,
                cohosts: decode_cohosts(&row.cohosts)?,
                create_calendar_event: row.create_calendar_event,
                invite_users: row.invite_users,
                live_stream_title: row.live_stream_title,
                live_stream_description: row.live_stream_description,
            },
            owner_id: UserId::new(row.owner_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_id: {}", e))
            })?,
            owner_name: row.owner_name,
            provider_id: row.provider_id,
            link: row.link,
            stream_link: row.stream_link,
            status: row.status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, kind, description, start_date, start_time, cohosts,
           create_calendar_event, invite_users, live_stream_title, live_stream_description,
           owner_id, owner_name, provider_id, link, stream_link, status, created_at, updated_at
    FROM conferences
"#;

#[async_trait]
impl ConferenceRepository for SqliteConferenceRepository {
    async fn create(&self, conference: &NewConference) -> Result<Conference, DomainError> {
        let now = Timestamp::now();
        let details = &conference.details;

        let result = sqlx::query(
            r#"
            INSERT INTO conferences (
                name, kind, description, start_date, start_time, cohosts,
                create_calendar_event, invite_users, live_stream_title, live_stream_description,
                owner_id, owner_name, provider_id, link, stream_link, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?17)
            "#,
        )
        .bind(&details.name)
        .bind(details.kind.as_str())
        .bind(&details.description)
        .bind(details.start_date)
        .bind(details.start_time)
        .bind(encode_cohosts(&details.cohosts)?)
        .bind(details.create_calendar_event)
        .bind(details.invite_users)
        .bind(&details.live_stream_title)
        .bind(&details.live_stream_description)
        .bind(conference.owner_id.as_str())
        .bind(&conference.owner_name)
        .bind(&conference.provider_id)
        .bind(&conference.link)
        .bind(&conference.stream_link)
        .bind(&conference.status)
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "save", &conference.link))?;

        Ok(Conference {
            id: ConferenceId::from_i64(result.last_insert_rowid()),
            details: details.clone(),
            owner_id: conference.owner_id.clone(),
            owner_name: conference.owner_name.clone(),
            provider_id: conference.provider_id.clone(),
            link: conference.link.clone(),
            stream_link: conference.stream_link.clone(),
            status: conference.status.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(
        &self,
        id: ConferenceId,
        owner: &UserId,
    ) -> Result<Option<Conference>, DomainError> {
        let row: Option<ConferenceRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1 AND owner_id = ?2", SELECT_COLUMNS))
                .bind(id.as_i64())
                .bind(owner.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find conference: {}", e),
                    )
                })?;

        row.map(Conference::try_from).transpose()
    }

    async fn list(
        &self,
        owner: &UserId,
        filter: &ConferenceFilter,
    ) -> Result<Vec<Conference>, DomainError> {
        let rows: Vec<ConferenceRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE owner_id = ?1
              AND (?2 IS NULL OR kind = ?2)
              AND (?3 IS NULL OR status = ?3)
            ORDER BY created_at DESC, id DESC
            "#,
            SELECT_COLUMNS
        ))
        .bind(owner.as_str())
        .bind(filter.kind.map(|k| k.as_str()))
        .bind(filter.status.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list conferences: {}", e),
            )
        })?;

        rows.into_iter().map(Conference::try_from).collect()
    }

    async fn update(&self, conference: &Conference) -> Result<(), DomainError> {
        let details = &conference.details;

        let result = sqlx::query(
            r#"
            UPDATE conferences SET
                name = ?3,
                kind = ?4,
                description = ?5,
                start_date = ?6,
                start_time = ?7,
                cohosts = ?8,
                create_calendar_event = ?9,
                invite_users = ?10,
                live_stream_title = ?11,
                live_stream_description = ?12,
                provider_id = ?13,
                link = ?14,
                stream_link = ?15,
                status = ?16,
                updated_at = ?17
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(conference.id.as_i64())
        .bind(conference.owner_id.as_str())
        .bind(&details.name)
        .bind(details.kind.as_str())
        .bind(&details.description)
        .bind(details.start_date)
        .bind(details.start_time)
        .bind(encode_cohosts(&details.cohosts)?)
        .bind(details.create_calendar_event)
        .bind(details.invite_users)
        .bind(&details.live_stream_title)
        .bind(&details.live_stream_description)
        .bind(&conference.provider_id)
        .bind(&conference.link)
        .bind(&conference.stream_link)
        .bind(&conference.status)
        .bind(conference.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update", &conference.link))?;

        if result.rows_affected() == 0 {
            return Err(not_found(conference.id));
        }

        Ok(())
    }

    async fn delete(&self, id: ConferenceId, owner: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM conferences WHERE id = ?1 AND owner_id = ?2")
            .bind(id.as_i64())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete conference: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn not_found(id: ConferenceId) -> DomainError {
    DomainError::new(ErrorCode::ConferenceNotFound, "Conference not found")
        .with_detail("conference_id", id.to_string())
}

fn map_write_error(e: sqlx::Error, action: &str, link: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DomainError::new(ErrorCode::DuplicateLink, "Conference link already exists")
                .with_detail("link", link);
        }
    }
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} conference: {}", action, e),
    )
}

fn encode_cohosts(cohosts: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(cohosts).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to encode cohosts: {}", e))
    })
}

fn decode_cohosts(raw: &str) -> Result<Vec<String>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid cohosts value: {}", e))
    })
}
