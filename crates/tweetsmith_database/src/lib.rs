//! Activity persistence for Tweetsmith.
//!
//! Generations, publishes, and engagements are appended to a single
//! `activity_log` table keyed by collection. When no database is configured
//! [`LogOnlyActivityStore`] stands in and writes each record to the log.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod store;

/// Diesel schema.
pub mod schema;

pub use connection::{DEFAULT_POOL_SIZE, PgPool, establish_pool, run_migrations};
pub use models::{ActivityRow, NewActivityRow};
pub use store::{LogOnlyActivityStore, PostgresActivityStore, select_activity_store};
