//! RenewSessionHandler - re-checks the grant behind a refresh token.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::GrantRepository;

/// Identity decoded from a valid refresh token.
#[derive(Debug, Clone)]
pub struct RenewSessionCommand {
    pub user: AuthenticatedUser,
}

pub struct RenewSessionHandler {
    grants: Arc<dyn GrantRepository>,
}

impl RenewSessionHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    /// Returns the identity with its current role; fails once the grant is gone.
    pub async fn handle(&self, cmd: RenewSessionCommand) -> Result<AuthenticatedUser, AccessError> {
        let portal = match cmd.user.portal.as_deref().map(PortalDomain::new) {
            Some(Ok(portal)) => portal,
            _ => return Err(AccessError::Revoked),
        };

        match self.grants.find(&portal, &cmd.user.id).await? {
            Some(grant) => Ok(cmd.user.with_grant(portal.as_str(), grant.role)),
            None => {
                tracing::info!(portal = %portal, user_id = %cmd.user.id, "Refresh refused: grant revoked");
                Err(AccessError::Revoked)
            }
        }
    }
}
