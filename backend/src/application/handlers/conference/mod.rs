//! Conference command and query handlers.

mod create_conference;
mod delete_conference;
mod get_conference;
mod list_conferences;
mod update_conference;

pub use create_conference::{CreateConferenceCommand, CreateConferenceHandler};
pub use delete_conference::{DeleteConferenceCommand, DeleteConferenceHandler};
pub use get_conference::{GetConferenceHandler, GetConferenceQuery};
pub use list_conferences::{ListConferencesHandler, ListConferencesQuery};
pub use update_conference::{UpdateConferenceCommand, UpdateConferenceHandler};
