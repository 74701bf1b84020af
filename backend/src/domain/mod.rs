//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, identity)
//! - `conference` - Conference record, kind, patch and filter types
//! - `access` - Portal grants that admit users to a session

pub mod access;
pub mod conference;
pub mod foundation;
