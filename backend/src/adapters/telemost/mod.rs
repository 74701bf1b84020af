//! Telemost adapters - Conference provider implementations.
//!
//! - `TelemostClient` - Yandex Telemost HTTP API
//! - `MockConferenceProvider` - In-process double for tests

mod client;
mod mock;
mod wire;

pub use client::{TelemostClient, TelemostClientConfig};
pub use mock::{MockConferenceProvider, ProviderCall};
