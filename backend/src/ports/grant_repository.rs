//! Grant repository port.
//!
//! Persists which users of which portal may open a session. Rows are keyed by
//! `(portal, user_id)`; saving an existing key replaces its role.

use crate::domain::access::{PortalDomain, PortalGrant};
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Repository port for portal grants.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// The grant for one user, if any.
    async fn find(
        &self,
        portal: &PortalDomain,
        user_id: &UserId,
    ) -> Result<Option<PortalGrant>, DomainError>;

    /// All grants of a portal, oldest first.
    async fn list(&self, portal: &PortalDomain) -> Result<Vec<PortalGrant>, DomainError>;

    /// Insert or replace the grant for `(portal, user_id)`.
    async fn save(&self, grant: &PortalGrant) -> Result<(), DomainError>;

    /// Remove a grant.
    ///
    /// # Errors
    ///
    /// - `GrantNotFound` if no row matched
    /// - `DatabaseError` on persistence failure
    async fn remove(&self, portal: &PortalDomain, user_id: &UserId) -> Result<(), DomainError>;
}
