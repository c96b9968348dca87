//! Twitter/X API v2 integration.
//!
//! - **client**: the [`TwitterClient`] implementing `SocialPlatform`
//! - **json_models**: request and response bodies of the v2 endpoints used

mod client;
mod json_models;

pub use client::TwitterClient;

/// Maximum length of a post in characters.
pub const MAX_POST_CHARS: usize = 280;
