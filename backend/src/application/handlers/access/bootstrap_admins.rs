//! BootstrapAdminsHandler - seeds the first admin of each configured portal.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::access::{AccessError, PortalDomain, PortalGrant};
use crate::domain::foundation::{Role, UserId};
use crate::ports::GrantRepository;

/// Portal/user pairs to make admin on portals that have no grants yet.
#[derive(Debug, Clone, Default)]
pub struct BootstrapAdminsCommand {
    pub admins: Vec<(PortalDomain, UserId)>,
}

pub struct BootstrapAdminsHandler {
    grants: Arc<dyn GrantRepository>,
}

impl BootstrapAdminsHandler {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }

    /// Returns how many grants were written.
    ///
    /// Only portals with no grants at all are seeded, so removing a bootstrap
    /// admin through the API sticks across restarts.
    pub async fn handle(&self, cmd: BootstrapAdminsCommand) -> Result<usize, AccessError> {
        let mut seedable: HashMap<PortalDomain, bool> = HashMap::new();
        let mut seeded = 0;

        for (portal, user_id) in cmd.admins {
            let seed = match seedable.get(&portal) {
                Some(seed) => *seed,
                None => {
                    let seed = self.grants.list(&portal).await?.is_empty();
                    seedable.insert(portal.clone(), seed);
                    seed
                }
            };
            if !seed {
                continue;
            }

            self.grants
                .save(&PortalGrant::new(portal.clone(), user_id.clone(), None, Role::Admin, None))
                .await?;
            tracing::info!(portal = %portal, user_id = %user_id, "Bootstrap admin granted");
            seeded += 1;
        }

        Ok(seeded)
    }
}
