//! Mock conference provider for testing.
//!
//! Hands out sequential meetings (`mock-1`, `mock-2`, ...) unless an error has
//! been queued, and records every call for verification.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockConferenceProvider::new()
//!     .with_error(ProviderError::unavailable("timeout"));
//!
//! assert!(provider.create_meeting(&spec).await.is_err());
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{ConferenceProvider, MeetingSpec, ProviderError, ProviderMeeting};

/// A recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Create(MeetingSpec),
    Update(String, MeetingSpec),
    Delete(String),
}

/// Mock provider for tests.
#[derive(Debug, Clone, Default)]
pub struct MockConferenceProvider {
    /// Errors returned by the next calls, in order.
    errors: Arc<Mutex<VecDeque<ProviderError>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    next_id: Arc<AtomicUsize>,
}

impl MockConferenceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `error`.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push_error(error);
        self
    }

    /// Queues a failure on a shared instance.
    pub fn push_error(&self, error: ProviderError) {
        self.errors.lock().unwrap().push_back(error);
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ProviderCall) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(call);
        match self.errors.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn meeting(&self, provider_id: String, spec: &MeetingSpec) -> ProviderMeeting {
        ProviderMeeting {
            link: format!("https://telemost.yandex.ru/j/{}", provider_id),
            stream_link: spec
                .kind
                .is_broadcast()
                .then(|| format!("https://telemost.yandex.ru/live/{}", provider_id)),
            provider_id,
        }
    }
}

#[async_trait]
impl ConferenceProvider for MockConferenceProvider {
    async fn create_meeting(&self, spec: &MeetingSpec) -> Result<ProviderMeeting, ProviderError> {
        self.record(ProviderCall::Create(spec.clone()))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.meeting(format!("mock-{}", id), spec))
    }

    async fn update_meeting(
        &self,
        provider_id: &str,
        spec: &MeetingSpec,
    ) -> Result<ProviderMeeting, ProviderError> {
        self.record(ProviderCall::Update(provider_id.to_string(), spec.clone()))?;
        Ok(self.meeting(provider_id.to_string(), spec))
    }

    async fn delete_meeting(&self, provider_id: &str) -> Result<(), ProviderError> {
        self.record(ProviderCall::Delete(provider_id.to_string()))
    }
}
