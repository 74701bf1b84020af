//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    BootstrapAdminsCommand, BootstrapAdminsHandler, CheckGrantHandler, CheckGrantQuery,
    GrantRoleCommand, GrantRoleHandler, ListGrantsHandler, ListGrantsQuery, OpenSessionCommand,
    OpenSessionHandler, RenewSessionCommand, RenewSessionHandler, RevokeGrantCommand,
    RevokeGrantHandler, CreateConferenceCommand, CreateConferenceHandler, DeleteConferenceCommand,
    DeleteConferenceHandler, GetConferenceHandler, GetConferenceQuery, ListConferencesHandler,
    ListConferencesQuery, UpdateConferenceCommand, UpdateConferenceHandler,
};
