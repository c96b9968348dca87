//! Test utilities for bot action and server tests.

pub mod mock_backend;
pub mod mock_platform;
pub mod recording_store;

#[allow(unused_imports)]
pub use mock_backend::MockBackend;
#[allow(unused_imports)]
pub use mock_platform::{MockPlatform, PostCall, TimelineCall};
#[allow(unused_imports)]
pub use recording_store::RecordingStore;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tweetsmith_bot::{Bot, BotConfig};
use tweetsmith_models::{ContentProvider, GenerationSettings};

/// Bundled configuration with a fast thread delay.
#[allow(dead_code)]
pub fn test_config() -> BotConfig {
    let mut config = BotConfig::bundled().unwrap();
    config.thread.delay_between_posts_ms = 2_000;
    config
}

/// Wire a bot around one mock backend and a mock platform.
#[allow(dead_code)]
pub fn assemble(
    config: BotConfig,
    backend: Arc<MockBackend>,
    platform: Arc<MockPlatform>,
    store: RecordingStore,
) -> Bot {
    let store = Arc::new(store);
    let provider = ContentProvider::builder()
        .primary(backend, GenerationSettings::default())
        .prompts(config.prompts.clone())
        .store(store.clone())
        .rng(StdRng::seed_from_u64(7))
        .build()
        .unwrap();
    let rng = Arc::new(Mutex::new(StdRng::seed_from_u64(42)));
    Bot::assemble(Arc::new(config), Arc::new(provider), platform, store, rng).unwrap()
}
