//! SQLite implementation of GrantRepository.

use crate::domain::access::{PortalDomain, PortalGrant};
use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::ports::GrantRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// SQLite implementation of the GrantRepository port.
pub struct SqliteGrantRepository {
    pool: SqlitePool,
}

impl SqliteGrantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GrantRow {
    portal: String,
    user_id: String,
    user_name: Option<String>,
    role: String,
    granted_at: DateTime<Utc>,
    granted_by: Option<String>,
}

impl TryFrom<GrantRow> for PortalGrant {
    type Error = DomainError;

    fn try_from(row: GrantRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: String| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", what, e))
        };

        Ok(PortalGrant {
            portal: PortalDomain::new(&row.portal).map_err(|e| corrupt("portal", e.to_string()))?,
            user_id: UserId::new(row.user_id).map_err(|e| corrupt("user_id", e.to_string()))?,
            user_name: row.user_name,
            role: row
                .role
                .parse::<Role>()
                .map_err(|e| corrupt("role", e.to_string()))?,
            granted_at: Timestamp::from_datetime(row.granted_at),
            granted_by: row
                .granted_by
                .map(UserId::new)
                .transpose()
                .map_err(|e| corrupt("granted_by", e.to_string()))?,
        })
    }
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} grant: {}", action, e),
    )
}

#[async_trait]
impl GrantRepository for SqliteGrantRepository {
    async fn find(
        &self,
        portal: &PortalDomain,
        user_id: &UserId,
    ) -> Result<Option<PortalGrant>, DomainError> {
        let row: Option<GrantRow> = sqlx::query_as(
            r#"
            SELECT portal, user_id, user_name, role, granted_at, granted_by
            FROM portal_grants
            WHERE portal = ?1 AND user_id = ?2
            "#,
        )
        .bind(portal.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find", e))?;

        row.map(PortalGrant::try_from).transpose()
    }

    async fn list(&self, portal: &PortalDomain) -> Result<Vec<PortalGrant>, DomainError> {
        let rows: Vec<GrantRow> = sqlx::query_as(
            r#"
            SELECT portal, user_id, user_name, role, granted_at, granted_by
            FROM portal_grants
            WHERE portal = ?1
            ORDER BY granted_at ASC, user_id ASC
            "#,
        )
        .bind(portal.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list", e))?;

        rows.into_iter().map(PortalGrant::try_from).collect()
    }

    async fn save(&self, grant: &PortalGrant) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO portal_grants (portal, user_id, user_name, role, granted_at, granted_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (portal, user_id) DO UPDATE SET
                user_name = excluded.user_name,
                role = excluded.role,
                granted_at = excluded.granted_at,
                granted_by = excluded.granted_by
            "#,
        )
        .bind(grant.portal.as_str())
        .bind(grant.user_id.as_str())
        .bind(&grant.user_name)
        .bind(grant.role.as_str())
        .bind(grant.granted_at.as_datetime())
        .bind(grant.granted_by.as_ref().map(UserId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("save", e))?;

        Ok(())
    }

    async fn remove(&self, portal: &PortalDomain, user_id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM portal_grants WHERE portal = ?1 AND user_id = ?2")
            .bind(portal.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("remove", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::GrantNotFound, "Grant not found")
                    .with_detail("user_id", user_id.as_str()),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::connect_in_memory;

    async fn repository() -> SqliteGrantRepository {
        SqliteGrantRepository::new(connect_in_memory().await.unwrap())
    }

    fn portal(name: &str) -> PortalDomain {
        PortalDomain::new(name).unwrap()
    }

    fn grant(portal_name: &str, user: &str, role: Role) -> PortalGrant {
        PortalGrant::new(
            portal(portal_name),
            UserId::new(user).unwrap(),
            Some(format!("User {}", user)),
            role,
            None,
        )
    }

    #[tokio::test]
    async fn saved_grant_is_found() {
        let repo = repository().await;
        let saved = grant("a.bitrix24.ru", "17", Role::Admin);
        repo.save(&saved).await.unwrap();

        let found = repo
            .find(&portal("a.bitrix24.ru"), &UserId::new("17").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn grants_are_scoped_to_their_portal() {
        let repo = repository().await;
        repo.save(&grant("a.bitrix24.ru", "17", Role::Admin)).await.unwrap();

        let elsewhere = repo
            .find(&portal("b.bitrix24.ru"), &UserId::new("17").unwrap())
            .await
            .unwrap();

        assert!(elsewhere.is_none());
        assert!(repo.list(&portal("b.bitrix24.ru")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_again_replaces_role() {
        let repo = repository().await;
        repo.save(&grant("a.bitrix24.ru", "17", Role::Observer)).await.unwrap();
        repo.save(&grant("a.bitrix24.ru", "17", Role::Admin)).await.unwrap();

        let all = repo.list(&portal("a.bitrix24.ru")).await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn remove_deletes_and_then_reports_missing() {
        let repo = repository().await;
        repo.save(&grant("a.bitrix24.ru", "17", Role::Observer)).await.unwrap();
        let user = UserId::new("17").unwrap();

        repo.remove(&portal("a.bitrix24.ru"), &user).await.unwrap();

        assert!(repo.find(&portal("a.bitrix24.ru"), &user).await.unwrap().is_none());
        let err = repo.remove(&portal("a.bitrix24.ru"), &user).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::GrantNotFound);
    }

    #[tokio::test]
    async fn unknown_role_is_rejected_by_schema() {
        let repo = repository().await;

        let result = sqlx::query(
            r#"
            INSERT INTO portal_grants (portal, user_id, role, granted_at)
            VALUES ('a.bitrix24.ru', '17', 'owner', '2025-01-01T00:00:00Z')
            "#,
        )
        .execute(&repo.pool)
        .await;

        assert!(result.is_err());
    }
}
