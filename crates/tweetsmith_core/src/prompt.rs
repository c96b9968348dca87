//! Prompt keys.

use serde::{Deserialize, Serialize};

/// Identifies a prompt template and the parsing strategy applied to its output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptKey {
    /// Inspirational quote about technology or programming
    Quote,
    /// Breaking-news style tech headline
    NewsItem,
    /// Poll question with four options
    Poll,
    /// Short educational thread
    Thread,
    /// Reply to another account's post
    EngagementReply,
    /// Quote-repost commentary on another account's post
    EngagementQuote,
}
