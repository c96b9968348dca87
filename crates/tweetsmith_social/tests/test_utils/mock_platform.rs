//! Mock social platform for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tweetsmith_core::{Account, PostOptions, TimelineExclude, TimelineItem};
use tweetsmith_error::{PlatformError, PlatformErrorKind, PlatformResult};
use tweetsmith_interface::SocialPlatform;

/// One recorded `post_item` call.
#[derive(Debug, Clone)]
pub struct PostCall {
    pub text: String,
    pub options: PostOptions,
    pub at: Instant,
}

/// Mock platform that fails the posts at the given zero-based call indices.
#[derive(Default)]
pub struct MockPlatform {
    fail_on: HashSet<usize>,
    posts: Arc<Mutex<Vec<PostCall>>>,
}

impl MockPlatform {
    /// Create a mock platform where every post succeeds.
    pub fn new_success() -> Self {
        Self::default()
    }

    /// Create a mock platform whose `index`-th post attempt fails.
    pub fn new_failing_at(index: usize) -> Self {
        Self {
            fail_on: HashSet::from([index]),
            ..Self::default()
        }
    }

    /// Every post attempt, in order.
    pub fn posts(&self) -> Vec<PostCall> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPlatform for MockPlatform {
    async fn post_item(&self, text: &str, options: &PostOptions) -> PlatformResult<String> {
        let mut posts = self.posts.lock().unwrap();
        let index = posts.len();
        posts.push(PostCall {
            text: text.to_string(),
            options: options.clone(),
            at: Instant::now(),
        });

        if self.fail_on.contains(&index) {
            Err(PlatformError::new(PlatformErrorKind::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }))
        } else {
            Ok(format!("tweet-{index}"))
        }
    }

    async fn like(&self, _item_id: &str) -> PlatformResult<()> {
        Ok(())
    }

    async fn recent_items(
        &self,
        _account_id: &str,
        _max: u32,
        _exclude: &[TimelineExclude],
    ) -> PlatformResult<Vec<TimelineItem>> {
        Ok(Vec::new())
    }

    async fn account_by_handle(&self, handle: &str) -> PlatformResult<String> {
        Ok(handle.to_string())
    }

    async fn current_account(&self) -> PlatformResult<Account> {
        Ok(Account::new("0", "mock", "Mock"))
    }

    fn platform_name(&self) -> &str {
        "mock"
    }
}
