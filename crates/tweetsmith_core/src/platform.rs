//! Social platform data types.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How a post relates to other posts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostOptions {
    /// Standalone post
    #[default]
    Standalone,
    /// Reply to the given item
    ReplyTo(String),
    /// Quote-repost of the given item
    Quote(String),
    /// Post carrying a poll
    Poll {
        /// Poll options in display order
        options: Vec<String>,
        /// How long the poll stays open
        duration_minutes: u32,
    },
}

impl PostOptions {
    /// Parent item id for replies.
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Self::ReplyTo(id) => Some(id),
            _ => None,
        }
    }
}

/// One unit posted to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PublishedItem {
    external_id: String,
    content: String,
    created_at: DateTime<Utc>,
    parent_id: Option<String>,
}

impl PublishedItem {
    /// Create a published item stamped with the current time.
    pub fn new(
        external_id: impl Into<String>,
        content: impl Into<String>,
        parent_id: Option<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            content: content.into(),
            created_at: Utc::now(),
            parent_id,
        }
    }
}

/// Categories of timeline items that can be excluded from a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TimelineExclude {
    /// Reposts of other accounts' items
    Retweets,
    /// Replies to other items
    Replies,
}

/// An item fetched from an account's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimelineItem {
    id: String,
    text: String,
}

impl TimelineItem {
    /// Create a timeline item.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A platform account.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Account {
    id: String,
    username: String,
    name: String,
}

impl Account {
    /// Create an account.
    pub fn new(id: impl Into<String>, username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: name.into(),
        }
    }
}
