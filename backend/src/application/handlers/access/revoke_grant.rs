//! RevokeGrantHandler - admin removes a user's grant.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain};
use crate::domain::foundation::{AuthenticatedUser, UserId, ValidationError};
use crate::ports::GrantRepository;

use super::admin_portal;

#[derive(Debug, Clone)]
pub struct RevokeGrantCommand {
    pub caller: AuthenticatedUser,
    pub portal: Option<PortalDomain>,
    pub user_id: UserId,
}

pub struct RevokeGrantHandler {
    grants: Arc<dyn GrantRepository>,
}

impl RevokeGrantHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    pub async fn handle(&self, cmd: RevokeGrantCommand) -> Result<(), AccessError> {
        let portal = admin_portal(self.grants.as_ref(), &cmd.caller, cmd.portal.as_ref()).await?;

        // An admin removing themselves could leave the portal without one.
        if cmd.user_id == cmd.caller.id {
            return Err(ValidationError::invalid_format(
                "user_id",
                "admins cannot revoke their own access",
            )
            .into());
        }

        self.grants.remove(&portal, &cmd.user_id).await?;

        tracing::info!(
            portal = %portal,
            user_id = %cmd.user_id,
            revoked_by = %cmd.caller.id,
            "Grant revoked"
        );
        Ok(())
    }
}
