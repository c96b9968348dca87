//! Mock social platform for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};
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

/// One recorded `recent_items` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineCall {
    pub account_id: String,
    pub max: u32,
    pub exclude: Vec<TimelineExclude>,
}

/// Mock platform with a fixed timeline for every account.
#[derive(Default)]
pub struct MockPlatform {
    timeline: Vec<TimelineItem>,
    fail_on: HashSet<usize>,
    post_delay: Option<Duration>,
    posts: Arc<Mutex<Vec<PostCall>>>,
    likes: Arc<Mutex<Vec<String>>>,
    timeline_calls: Arc<Mutex<Vec<TimelineCall>>>,
    in_flight: Arc<Mutex<usize>>,
    max_in_flight: Arc<Mutex<usize>>,
}

impl MockPlatform {
    /// Create a mock platform where every post succeeds.
    pub fn new_success() -> Self {
        Self::default()
    }

    /// Create a mock platform whose `index`-th post attempt fails.
    #[allow(dead_code)]
    pub fn new_failing_at(index: usize) -> Self {
        Self {
            fail_on: HashSet::from([index]),
            ..Self::default()
        }
    }

    /// Serve `items` as every account's recent timeline.
    #[allow(dead_code)]
    pub fn with_timeline(mut self, items: Vec<TimelineItem>) -> Self {
        self.timeline = items;
        self
    }

    /// Hold every post for `delay` before answering.
    #[allow(dead_code)]
    pub fn with_post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = Some(delay);
        self
    }

    /// Every post attempt, in order.
    #[allow(dead_code)]
    pub fn posts(&self) -> Vec<PostCall> {
        self.posts.lock().unwrap().clone()
    }

    /// Items liked, in order.
    #[allow(dead_code)]
    pub fn likes(&self) -> Vec<String> {
        self.likes.lock().unwrap().clone()
    }

    /// Timeline requests, in order.
    #[allow(dead_code)]
    pub fn timeline_calls(&self) -> Vec<TimelineCall> {
        self.timeline_calls.lock().unwrap().clone()
    }

    /// Most posts ever awaiting an answer at once.
    #[allow(dead_code)]
    pub fn max_in_flight(&self) -> usize {
        *self.max_in_flight.lock().unwrap()
    }
}

#[async_trait]
impl SocialPlatform for MockPlatform {
    async fn post_item(&self, text: &str, options: &PostOptions) -> PlatformResult<String> {
        let index = {
            let mut posts = self.posts.lock().unwrap();
            posts.push(PostCall {
                text: text.to_string(),
                options: options.clone(),
                at: Instant::now(),
            });
            posts.len() - 1
        };

        if let Some(delay) = self.post_delay {
            {
                let mut in_flight = self.in_flight.lock().unwrap();
                *in_flight += 1;
                let mut max = self.max_in_flight.lock().unwrap();
                *max = (*max).max(*in_flight);
            }
            tokio::time::sleep(delay).await;
            *self.in_flight.lock().unwrap() -= 1;
        }

        if self.fail_on.contains(&index) {
            Err(PlatformError::new(PlatformErrorKind::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }))
        } else {
            Ok(format!("tweet-{index}"))
        }
    }

    async fn like(&self, item_id: &str) -> PlatformResult<()> {
        self.likes.lock().unwrap().push(item_id.to_string());
        Ok(())
    }

    async fn recent_items(
        &self,
        account_id: &str,
        max: u32,
        exclude: &[TimelineExclude],
    ) -> PlatformResult<Vec<TimelineItem>> {
        self.timeline_calls.lock().unwrap().push(TimelineCall {
            account_id: account_id.to_string(),
            max,
            exclude: exclude.to_vec(),
        });
        Ok(self.timeline.clone())
    }

    async fn account_by_handle(&self, handle: &str) -> PlatformResult<String> {
        Ok(format!("id-{handle}"))
    }

    async fn current_account(&self) -> PlatformResult<Account> {
        Ok(Account::new("0", "mock", "Mock"))
    }

    fn platform_name(&self) -> &str {
        "mock"
    }
}
