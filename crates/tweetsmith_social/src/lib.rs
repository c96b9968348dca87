//! Social platform integrations for Tweetsmith.
//!
//! - [`TwitterClient`]: Twitter/X API v2 over OAuth 2.0 user-context bearer auth
//! - [`DryRunPlatform`]: logs writes instead of posting
//! - [`Publisher`]: posts single items and reply chains, mirroring each
//!   publish into the activity store
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tweetsmith_interface::ActivityStore;
//! use tweetsmith_social::{Publisher, TwitterClient};
//!
//! # async fn example(store: Arc<dyn ActivityStore>) {
//! let twitter = TwitterClient::new(std::env::var("TWITTER_BEARER_TOKEN").unwrap_or_default());
//! let publisher = Publisher::new(Arc::new(twitter), store, Duration::from_secs(2));
//!
//! let chain = vec!["🧵 Title".to_string(), "1️⃣ First".to_string()];
//! let published = publisher.publish_chain(&chain).await;
//! println!("published {} of {}", published.len(), chain.len());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod publisher;
mod twitter;

pub use dry_run::DryRunPlatform;
pub use publisher::Publisher;
pub use twitter::{MAX_POST_CHARS, TwitterClient};
