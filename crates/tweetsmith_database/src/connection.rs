//! Connection pooling and migrations.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};
use tweetsmith_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Default maximum number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Pool of PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build a connection pool and check out one connection to verify it.
///
/// # Errors
///
/// Returns error if the pool cannot be built or no connection can be made.
pub fn establish_pool(database_url: &str, pool_size: u32) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(pool_size)
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

    // Warm up the pool
    pool.get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

    debug!(pool_size, "Connection pool ready");
    Ok(pool)
}

/// Run pending migrations.
pub fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    let mut conn = pool
        .get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    info!(count = applied.len(), "Applied pending migrations");
    Ok(())
}
