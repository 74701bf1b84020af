//! Telemost Bridge - Bitrix24 iframe backend for Yandex Telemost conferences
//!
//! Identifies the calling portal user, creates, edits and deletes meetings
//! through the Telemost API, and keeps an owner-scoped record of each one.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
