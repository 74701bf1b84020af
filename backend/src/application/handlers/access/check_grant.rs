//! CheckGrantHandler - reports whether a portal user may sign in.

use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain};
use crate::domain::foundation::{Role, UserId};
use crate::ports::GrantRepository;

#[derive(Debug, Clone)]
pub struct CheckGrantQuery {
    pub portal: PortalDomain,
    pub user_id: UserId,
}

pub struct CheckGrantHandler {
    grants: Arc<dyn GrantRepository>,
}

impl CheckGrantHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    pub async fn handle(&self, query: CheckGrantQuery) -> Result<Option<Role>, AccessError> {
        Ok(self
            .grants
            .find(&query.portal, &query.user_id)
            .await?
            .map(|grant| grant.role))
    }
}
