//! Collaborator trait definitions.

use async_trait::async_trait;
use tweetsmith_core::{Account, Collection, CompletionRequest, PostOptions, TimelineExclude, TimelineItem};
use tweetsmith_error::{BackendResult, DatabaseResult, PlatformResult};

/// A generative text provider.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Complete a single-turn prompt and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> BackendResult<String>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// The social platform posts are published to.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// Publish text and return the new item's id.
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the post or the request fails.
    async fn post_item(&self, text: &str, options: &PostOptions) -> PlatformResult<String>;

    /// Like an item as the authenticated account.
    async fn like(&self, item_id: &str) -> PlatformResult<()>;

    /// Most recent items of an account, newest first, at most `max`.
    async fn recent_items(
        &self,
        account_id: &str,
        max: u32,
        exclude: &[TimelineExclude],
    ) -> PlatformResult<Vec<TimelineItem>>;

    /// Resolve a handle (without `@`) to an account id.
    async fn account_by_handle(&self, handle: &str) -> PlatformResult<String>;

    /// The authenticated account.
    async fn current_account(&self) -> PlatformResult<Account>;

    /// Platform name (e.g., "twitter").
    fn platform_name(&self) -> &str;
}

/// Append-only store for activity records.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append a record to a collection and return the stored record's id.
    async fn append(&self, collection: Collection, record: serde_json::Value)
    -> DatabaseResult<String>;

    /// Store name for logs (e.g., "postgres", "log-only").
    fn store_name(&self) -> &str;
}
