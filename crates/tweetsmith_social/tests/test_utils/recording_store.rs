//! Activity store that keeps appended records in memory.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tweetsmith_core::Collection;
use tweetsmith_error::DatabaseResult;
use tweetsmith_interface::ActivityStore;

/// Records every append for later assertions.
#[derive(Default, Clone)]
pub struct RecordingStore {
    records: Arc<Mutex<Vec<(Collection, serde_json::Value)>>>,
}

impl RecordingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended to a collection, in order.
    pub fn records(&self, collection: Collection) -> Vec<serde_json::Value> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == collection)
            .map(|(_, record)| record.clone())
            .collect()
    }
}

#[async_trait]
impl ActivityStore for RecordingStore {
    async fn append(
        &self,
        collection: Collection,
        record: serde_json::Value,
    ) -> DatabaseResult<String> {
        let mut records = self.records.lock().unwrap();
        records.push((collection, record));
        Ok(format!("rec-{}", records.len()))
    }

    fn store_name(&self) -> &str {
        "recording"
    }
}
