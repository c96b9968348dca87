//! Core data types for the Tweetsmith posting agent.
//!
//! This crate holds the transient entities that flow between content
//! generation, parsing, and publishing, together with the pure response
//! parser that turns generated text into poll and thread drafts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod content;
mod draft;
mod parser;
mod platform;
mod prompt;
mod request;

pub use activity::{Collection, EngagementRecord, GenerationRecord, PostKind, PostRecord};
pub use content::{GeneratedContent, SourceBackend};
pub use draft::{POLL_OPTION_COUNT, PollDraft, ThreadDraft, ThreadItem};
pub use parser::{parse_poll, parse_thread};
pub use platform::{Account, PostOptions, PublishedItem, TimelineExclude, TimelineItem};
pub use prompt::PromptKey;
pub use request::CompletionRequest;
