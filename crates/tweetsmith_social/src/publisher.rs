//! Publishing single items and reply chains.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tweetsmith_core::{Collection, PollDraft, PostKind, PostOptions, PostRecord, PublishedItem};
use tweetsmith_interface::{ActivityStore, SocialPlatform, append_or_log};

/// Posts content to a platform and mirrors each publish into the activity
/// store.
///
/// Publish failures are logged and surface as absent results; there is no
/// retry.
#[derive(Clone)]
pub struct Publisher {
    platform: Arc<dyn SocialPlatform>,
    store: Arc<dyn ActivityStore>,
    chain_delay: Duration,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("platform", &self.platform.platform_name())
            .field("store", &self.store.store_name())
            .field("chain_delay", &self.chain_delay)
            .finish()
    }
}

impl Publisher {
    /// Create a publisher.
    ///
    /// # Arguments
    ///
    /// * `platform` - Platform posts go to
    /// * `store` - Activity store publishes are recorded in
    /// * `chain_delay` - Pause between consecutive posts of a chain
    pub fn new(
        platform: Arc<dyn SocialPlatform>,
        store: Arc<dyn ActivityStore>,
        chain_delay: Duration,
    ) -> Self {
        Self {
            platform,
            store,
            chain_delay,
        }
    }

    /// Platform posts go to.
    pub fn platform(&self) -> &Arc<dyn SocialPlatform> {
        &self.platform
    }

    /// Publish a standalone post.
    pub async fn publish_single(&self, text: &str) -> Option<PublishedItem> {
        self.publish_with(text, &PostOptions::Standalone, PostKind::Single)
            .await
    }

    /// Publish a poll.
    pub async fn publish_poll(&self, poll: &PollDraft) -> Option<PublishedItem> {
        let options = PostOptions::Poll {
            options: poll.options().clone(),
            duration_minutes: *poll.duration_minutes(),
        };
        self.publish_with(poll.question(), &options, PostKind::Poll)
            .await
    }

    /// Publish a post with explicit options, recording it as `kind`.
    #[instrument(skip(self, text, options), fields(platform = self.platform.platform_name()))]
    pub async fn publish_with(
        &self,
        text: &str,
        options: &PostOptions,
        kind: PostKind,
    ) -> Option<PublishedItem> {
        self.post_and_record(text, options, kind, None).await
    }

    /// Publish items as a reply chain, strictly in order.
    ///
    /// Item `i > 0` replies to item `i - 1`. The publisher sleeps for the
    /// chain delay between posts. The first failure ends the chain; the
    /// returned vector is the prefix that was published.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn publish_chain(&self, items: &[String]) -> Vec<PublishedItem> {
        let mut published: Vec<PublishedItem> = Vec::with_capacity(items.len());

        for (index, text) in items.iter().enumerate() {
            let options = match published.last() {
                Some(previous) => {
                    tokio::time::sleep(self.chain_delay).await;
                    PostOptions::ReplyTo(previous.external_id().clone())
                }
                None => PostOptions::Standalone,
            };

            match self
                .post_and_record(text, &options, PostKind::ThreadItem, Some(index))
                .await
            {
                Some(item) => published.push(item),
                None => {
                    warn!(
                        index,
                        published = published.len(),
                        "Chain aborted, keeping published prefix"
                    );
                    break;
                }
            }
        }

        debug!(published = published.len(), "Chain finished");
        published
    }

    async fn post_and_record(
        &self,
        text: &str,
        options: &PostOptions,
        kind: PostKind,
        thread_index: Option<usize>,
    ) -> Option<PublishedItem> {
        let (parent_id, quoted_id) = match options {
            PostOptions::ReplyTo(id) => (Some(id.clone()), None),
            PostOptions::Quote(id) => (None, Some(id.clone())),
            _ => (None, None),
        };

        let external_id = match self.platform.post_item(text, options).await {
            Ok(id) => id,
            Err(e) => {
                error!(?kind, index = ?thread_index, error = %e, "Publish failed");
                return None;
            }
        };

        info!(external_id = %external_id, ?kind, index = ?thread_index, "Published");

        let record = PostRecord {
            kind,
            text: text.to_string(),
            external_id: external_id.clone(),
            thread_index,
            parent_id: parent_id.clone(),
            quoted_id,
            created_at: Utc::now(),
        };
        append_or_log(self.store.as_ref(), Collection::Posts, &record).await;

        Some(PublishedItem::new(external_id, text, parent_id))
    }
}
