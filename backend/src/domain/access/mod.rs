//! Access module - which portal users may open a session, and as what.
//!
//! A user is admitted only while a [`PortalGrant`] exists for their portal and
//! id. Admins of a portal manage its grants.

mod errors;
mod grant;

pub use errors::AccessError;
pub use grant::{PortalDomain, PortalGrant};
