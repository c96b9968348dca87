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

/// Mock backend that counts and records its requests.
pub struct MockBackend {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    /// Create a mock backend that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock backend that always fails with the given error.
    #[allow(dead_code)]
    pub fn new_error(error: BackendErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times complete() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// User prompts received so far.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextBackend for MockBackend {
    async fn complete(&self, request: &CompletionRequest) -> BackendResult<String> {
        *self.call_count.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(request.prompt.clone());

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(BackendError::new(kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
