//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod access;
pub mod conference;

pub use access::{
    BootstrapAdminsCommand, BootstrapAdminsHandler, CheckGrantHandler, CheckGrantQuery,
    GrantRoleCommand, GrantRoleHandler, ListGrantsHandler, ListGrantsQuery, OpenSessionCommand,
    OpenSessionHandler, RenewSessionCommand, RenewSessionHandler, RevokeGrantCommand,
    RevokeGrantHandler,
};
pub use conference::{
    CreateConferenceCommand, CreateConferenceHandler, DeleteConferenceCommand,
    DeleteConferenceHandler, GetConferenceHandler, GetConferenceQuery, ListConferencesHandler,
    ListConferencesQuery, UpdateConferenceCommand, UpdateConferenceHandler,
};
