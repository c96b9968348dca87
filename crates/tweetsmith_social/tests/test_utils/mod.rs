//! Test utilities for publisher tests.

pub mod mock_platform;
pub mod recording_store;

#[allow(unused_imports)]
pub use mock_platform::{MockPlatform, PostCall};
#[allow(unused_imports)]
pub use recording_store::RecordingStore;
