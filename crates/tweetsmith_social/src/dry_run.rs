//! Platform that logs writes instead of posting.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use tweetsmith_core::{Account, PostOptions, TimelineExclude, TimelineItem};
use tweetsmith_error::PlatformResult;
use tweetsmith_interface::SocialPlatform;

/// Platform implementation for `--dry-run`.
///
/// Posts and likes are logged and assigned a local id. Reads go to an optional
/// inner platform so engagement can still pick real items; without one,
/// timelines are empty.
#[derive(Clone, Default)]
pub struct DryRunPlatform {
    reader: Option<Arc<dyn SocialPlatform>>,
}

impl std::fmt::Debug for DryRunPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DryRunPlatform")
            .field("reader", &self.reader.as_ref().map(|r| r.platform_name().to_string()))
            .finish()
    }
}

impl DryRunPlatform {
    /// Create a dry-run platform with no reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve reads from `reader` while still suppressing writes.
    pub fn with_reader(reader: Arc<dyn SocialPlatform>) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

#[async_trait]
impl SocialPlatform for DryRunPlatform {
    async fn post_item(&self, text: &str, options: &PostOptions) -> PlatformResult<String> {
        let id = format!("dry-run-{}", uuid::Uuid::new_v4());
        info!(external_id = %id, ?options, text, "DryRunPlatform: would post");
        Ok(id)
    }

    async fn like(&self, item_id: &str) -> PlatformResult<()> {
        info!(item_id, "DryRunPlatform: would like");
        Ok(())
    }

    async fn recent_items(
        &self,
        account_id: &str,
        max: u32,
        exclude: &[TimelineExclude],
    ) -> PlatformResult<Vec<TimelineItem>> {
        match &self.reader {
            Some(reader) => reader.recent_items(account_id, max, exclude).await,
            None => Ok(Vec::new()),
        }
    }

    async fn account_by_handle(&self, handle: &str) -> PlatformResult<String> {
        match &self.reader {
            Some(reader) => reader.account_by_handle(handle).await,
            None => Ok(handle.trim_start_matches('@').to_string()),
        }
    }

    async fn current_account(&self) -> PlatformResult<Account> {
        match &self.reader {
            Some(reader) => reader.current_account().await,
            None => Ok(Account::new("dry-run", "dry_run", "Dry Run")),
        }
    }

    fn platform_name(&self) -> &str {
        "dry-run"
    }
}
