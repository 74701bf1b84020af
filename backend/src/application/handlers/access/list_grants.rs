//! ListGrantsHandler - grants of the caller's portal, for admins.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain, PortalGrant};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::GrantRepository;

use super::admin_portal;

#[derive(Debug, Clone)]
pub struct ListGrantsQuery {
    pub caller: AuthenticatedUser,
    /// Portal named by the request, if any; must be the caller's.
    pub portal: Option<PortalDomain>,
}

pub struct ListGrantsHandler {
    grants: Arc<dyn GrantRepository>,
}

impl ListGrantsHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    pub async fn handle(&self, query: ListGrantsQuery) -> Result<Vec<PortalGrant>, AccessError> {
        let portal = admin_portal(self.grants.as_ref(), &query.caller, query.portal.as_ref()).await?;
        Ok(self.grants.list(&portal).await?)
    }
}
