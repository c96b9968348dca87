//! Trait seams between the bot and its external collaborators.
//!
//! - [`TextBackend`]: a generative text provider
//! - [`SocialPlatform`]: the platform posts are published to
//! - [`ActivityStore`]: the append-only log of generations and publishes
//!
//! Implementations are constructed once at startup and shared as
//! `Arc<dyn Trait>`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;
mod traits;

pub use store::append_or_log;
pub use traits::{ActivityStore, SocialPlatform, TextBackend};
