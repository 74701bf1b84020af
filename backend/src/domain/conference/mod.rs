//! Conference module - the single persisted entity and its value objects.

mod aggregate;
mod errors;
mod kind;

pub use aggregate::{
    parse_start_date, parse_start_time, validate_name, Conference, ConferenceDetails,
    ConferenceFilter, ConferencePatch, NewConference, DEFAULT_STATUS, MAX_NAME_LEN,
};
pub use errors::ConferenceError;
pub use kind::ConferenceKind;
