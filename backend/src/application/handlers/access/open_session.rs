//! OpenSessionHandler - admits a portal user who holds a grant.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::GrantRepository;

/// Identity reported by the portal SDK, before any token exists.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub portal: PortalDomain,
    pub user: AuthenticatedUser,
}

pub struct OpenSessionHandler {
    grants: Arc<dyn GrantRepository>,
}

impl OpenSessionHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    /// Returns the identity bound to its grant, ready to be signed.
    pub async fn handle(&self, cmd: OpenSessionCommand) -> Result<AuthenticatedUser, AccessError> {
        let Some(grant) = self.grants.find(&cmd.portal, &cmd.user.id).await? else {
            tracing::info!(
                portal = %cmd.portal,
                user_id = %cmd.user.id,
                "Session refused: no grant"
            );
            return Err(AccessError::NoGrant);
        };

        Ok(cmd.user.with_grant(cmd.portal.as_str(), grant.role))
    }
}
