//! Test utilities for content provider tests.

pub mod mock_backend;
pub mod recording_store;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockBehavior};
#[allow(unused_imports)]
pub use recording_store::RecordingStore;
