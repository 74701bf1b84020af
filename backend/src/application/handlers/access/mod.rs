//! Access command and query handlers: session admission and grant management.

mod bootstrap_admins;
mod check_grant;
mod grant_role;
mod list_grants;
mod open_session;
mod renew_session;
mod revoke_grant;

pub use bootstrap_admins::{BootstrapAdminsCommand, BootstrapAdminsHandler};
pub use check_grant::{CheckGrantHandler, CheckGrantQuery};
pub use grant_role::{GrantRoleCommand, GrantRoleHandler};
pub use list_grants::{ListGrantsHandler, ListGrantsQuery};
pub use open_session::{OpenSessionCommand, OpenSessionHandler};
pub use renew_session::{RenewSessionCommand, RenewSessionHandler};
pub use revoke_grant::{RevokeGrantCommand, RevokeGrantHandler};

use crate::domain::access::{AccessError, PortalDomain};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::GrantRepository;

/// Resolves the portal `caller` administers.
///
/// The role is read from the store, not from the token, so a demoted admin
/// loses management rights before their access token expires. A `requested`
/// portal other than the caller's own is refused.
async fn admin_portal(
    grants: &dyn GrantRepository,
    caller: &AuthenticatedUser,
    requested: Option<&PortalDomain>,
) -> Result<PortalDomain, AccessError> {
    let portal = caller
        .portal
        .as_deref()
        .map(PortalDomain::new)
        .transpose()?
        .ok_or(AccessError::AdminRequired)?;

    if requested.is_some_and(|requested| requested != &portal) {
        return Err(AccessError::AdminRequired);
    }

    match grants.find(&portal, &caller.id).await? {
        Some(grant) if grant.role.is_admin() => Ok(portal),
        _ => Err(AccessError::AdminRequired),
    }
}
