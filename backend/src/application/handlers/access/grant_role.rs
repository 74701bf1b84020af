//! GrantRoleHandler - admin adds a user or changes their role.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain, PortalGrant};
use crate::domain::foundation::{AuthenticatedUser, Role, UserId};
use crate::ports::GrantRepository;

use super::admin_portal;

#[derive(Debug, Clone)]
pub struct GrantRoleCommand {
    pub caller: AuthenticatedUser,
    pub portal: Option<PortalDomain>,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub role: Role,
}

pub struct GrantRoleHandler {
    grants: Arc<dyn GrantRepository>,
}

impl GrantRoleHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    pub async fn handle(&self, cmd: GrantRoleCommand) -> Result<PortalGrant, AccessError> {
        let portal = admin_portal(self.grants.as_ref(), &cmd.caller, cmd.portal.as_ref()).await?;

        let grant = PortalGrant::new(
            portal,
            cmd.user_id,
            cmd.user_name,
            cmd.role,
            Some(cmd.caller.id.clone()),
        );
        self.grants.save(&grant).await?;

        tracing::info!(
            portal = %grant.portal,
            user_id = %grant.user_id,
            role = %grant.role,
            granted_by = %cmd.caller.id,
            "Grant saved"
        );
        Ok(grant)
    }
}
