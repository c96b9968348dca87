//! Error types for Tweetsmith.
//!
//! Every concern follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tweetsmith_error::{ConfigError, TweetsmithResult};
//!
//! fn load_schedule() -> TweetsmithResult<String> {
//!     Err(ConfigError::new("schedule.main_activity must be set"))?
//! }
//!
//! assert!(load_schedule().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod database;
mod error;
mod platform;
mod server;

pub use backend::{BackendError, BackendErrorKind, BackendResult};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use error::{TweetsmithError, TweetsmithErrorKind, TweetsmithResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use server::{ServerError, ServerErrorKind};
