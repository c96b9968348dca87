//! Activity store implementations.

use crate::connection::{DEFAULT_POOL_SIZE, PgPool, establish_pool, run_migrations};
use crate::models::{ActivityRow, NewActivityRow};
use crate::schema::activity_log;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use tweetsmith_core::Collection;
use tweetsmith_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use tweetsmith_interface::ActivityStore;

/// Activity store backed by the PostgreSQL `activity_log` table.
///
/// Diesel calls run on the blocking thread pool.
#[derive(Clone)]
pub struct PostgresActivityStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresActivityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresActivityStore")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl PostgresActivityStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, run pending migrations, and return the store.
    ///
    /// # Errors
    ///
    /// Returns error if the database is unreachable or a migration fails.
    pub fn connect(database_url: &str) -> DatabaseResult<Self> {
        let pool = establish_pool(database_url, DEFAULT_POOL_SIZE)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    /// Most recent records of a collection, newest first.
    pub async fn recent(&self, collection: Collection, limit: i64) -> DatabaseResult<Vec<ActivityRow>> {
        let pool = self.pool.clone();
        let name = collection.to_string();

        tokio::task::spawn_blocking(move || -> DatabaseResult<Vec<ActivityRow>> {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            Ok(activity_log::table
                .filter(activity_log::collection.eq(name))
                .order(activity_log::created_at.desc())
                .limit(limit)
                .select(ActivityRow::as_select())
                .load(&mut conn)?)
        })
        .await
        .map_err(join_error)?
    }
}

fn join_error(e: tokio::task::JoinError) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query(format!("blocking task failed: {e}")))
}

#[async_trait]
impl ActivityStore for PostgresActivityStore {
    #[instrument(skip(self, record), fields(collection = %collection))]
    async fn append(
        &self,
        collection: Collection,
        record: serde_json::Value,
    ) -> DatabaseResult<String> {
        let pool = self.pool.clone();
        let row = NewActivityRow {
            collection: collection.to_string(),
            record,
        };

        let id = tokio::task::spawn_blocking(move || -> DatabaseResult<i64> {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            Ok(diesel::insert_into(activity_log::table)
                .values(&row)
                .returning(activity_log::id)
                .get_result(&mut conn)?)
        })
        .await
        .map_err(join_error)??;

        debug!(id, "Activity row inserted");
        Ok(id.to_string())
    }

    fn store_name(&self) -> &str {
        "postgres"
    }
}

/// Activity store that only logs each record.
#[derive(Debug, Clone, Default)]
pub struct LogOnlyActivityStore;

impl LogOnlyActivityStore {
    /// Create a log-only store.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActivityStore for LogOnlyActivityStore {
    async fn append(
        &self,
        collection: Collection,
        record: serde_json::Value,
    ) -> DatabaseResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        info!(collection = %collection, id = %id, record = %record, "Activity (log-only)");
        Ok(id)
    }

    fn store_name(&self) -> &str {
        "log-only"
    }
}

/// Pick the activity store at startup.
///
/// Without a database URL the log-only store is used. A configured URL must
/// connect.
///
/// # Errors
///
/// Returns error if the URL is set but the database is unreachable or a
/// migration fails.
pub fn select_activity_store(database_url: Option<&str>) -> DatabaseResult<Arc<dyn ActivityStore>> {
    let Some(url) = database_url.filter(|u| !u.trim().is_empty()) else {
        warn!("DATABASE_URL not set, activity is logged only");
        return Ok(Arc::new(LogOnlyActivityStore::new()));
    };

    let store = PostgresActivityStore::connect(url)?;
    info!("Activity store connected to PostgreSQL");
    Ok(Arc::new(store))
}
