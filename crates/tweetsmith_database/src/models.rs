//! Diesel rows for the activity log.

use crate::schema::activity_log;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored activity record.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = activity_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Row id
    pub id: i64,
    /// Collection name (e.g., "posts")
    pub collection: String,
    /// Record payload
    pub record: serde_json::Value,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

/// Insertable activity record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivityRow {
    /// Collection name
    pub collection: String,
    /// Record payload
    pub record: serde_json::Value,
}
