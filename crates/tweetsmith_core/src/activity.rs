//! Records mirrored into the activity store.

use crate::{PromptKey, SourceBackend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named collection an activity record is appended to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// Every text generation, including fallbacks
    Generations,
    /// Every successful publish
    Posts,
    /// Engagement outcomes
    Engagements,
}

/// Generation log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generated text
    pub text: String,
    /// Tier that produced it
    pub backend: SourceBackend,
    /// Provider behind the tier
    pub provider: String,
    /// Prompt answered
    pub prompt_key: PromptKey,
    /// When it was produced
    pub created_at: DateTime<Utc>,
}

/// What kind of post was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    /// Standalone post
    Single,
    /// Member of a reply chain
    ThreadItem,
    /// Post carrying a poll
    Poll,
    /// Reply to another account
    Reply,
    /// Quote-repost of another account
    Quote,
}

/// Publish log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Kind of post
    pub kind: PostKind,
    /// Published text
    pub text: String,
    /// Platform id
    pub external_id: String,
    /// Position within a chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_index: Option<usize>,
    /// Item this one replies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Item this one quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_id: Option<String>,
    /// When it was published
    pub created_at: DateTime<Utc>,
}

/// Engagement log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    /// Handle of the engaged account
    pub account: String,
    /// Item engaged with
    pub item_id: String,
    /// Whether the item was liked
    pub liked: bool,
    /// Id of the quote-repost, if one was published
    pub quote_id: Option<String>,
    /// Id of the reply, if one was published
    pub reply_id: Option<String>,
    /// When the engagement ran
    pub created_at: DateTime<Utc>,
}
