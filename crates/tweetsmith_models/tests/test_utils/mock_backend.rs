//! Mock text backend for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tweetsmith_core::CompletionRequest;
use tweetsmith_error::{BackendError, BackendErrorKind, BackendResult};
use tweetsmith_interface::TextBackend;

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(BackendErrorKind),
}

/// Mock backend that records every request it receives.
pub struct MockBackend {
    behavior: MockBehavior,
    name: &'static str,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockBackend {
    /// Create a mock backend that always succeeds with the given text.
    pub fn new_success(name: &'static str, text: impl Into<String>) -> Self {
        Self::new_with_behavior(name, MockBehavior::Success(text.into()))
    }

    /// Create a mock backend that always fails with the given error.
    pub fn new_error(name: &'static str, error: BackendErrorKind) -> Self {
        Self::new_with_behavior(name, MockBehavior::Error(error))
    }

    /// Create a mock backend with custom behavior.
    pub fn new_with_behavior(name: &'static str, behavior: MockBehavior) -> Self {
        Self {
            behavior,
            name,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times complete() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Requests received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextBackend for MockBackend {
    async fn complete(&self, request: &CompletionRequest) -> BackendResult<String> {
        *self.call_count.lock().unwrap() += 1;
        self.requests.lock().unwrap().push(request.clone());

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(BackendError::new(kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
