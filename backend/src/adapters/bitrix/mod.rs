//! Bitrix24 adapters - Portal directory lookups via inbound webhook.

mod client;

pub use client::BitrixClient;
