//! Helpers for writing to an activity store without blocking the main flow.

use crate::ActivityStore;
use serde::Serialize;
use tracing::{debug, warn};
use tweetsmith_core::Collection;

/// Append a record, logging and swallowing any failure.
///
/// Returns the stored id on success.
pub async fn append_or_log<R: Serialize>(
    store: &dyn ActivityStore,
    collection: Collection,
    record: &R,
) -> Option<String> {
    let value = match serde_json::to_value(record) {
        Ok(value) => value,
        Err(e) => {
            warn!(collection = %collection, error = %e, "Failed to serialize activity record");
            return None;
        }
    };

    match store.append(collection, value).await {
        Ok(id) => {
            debug!(collection = %collection, store = store.store_name(), id = %id, "Activity recorded");
            Some(id)
        }
        Err(e) => {
            warn!(
                collection = %collection,
                store = store.store_name(),
                error = %e,
                "Failed to record activity"
            );
            None
        }
    }
}
