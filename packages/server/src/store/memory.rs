use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::StreamExt;
use futures::stream;

use super::{Document, RecordStore, RecordStream, StoreError};

/// In-process store keyed by identifier.
///
/// Listing yields records in identifier order, which for UUIDv7 ids is
/// insertion order.
pub struct MemoryStore<T> {
    records: Arc<DashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> RecordStore<T> for MemoryStore<T> {
    fn find_all(&self) -> RecordStream<T> {
        let records = Arc::clone(&self.records);
        stream::once(async move {
            let mut snapshot: Vec<(String, T)> = records
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect();
            snapshot.sort_by(|a, b| a.0.cmp(&b.0));
            stream::iter(snapshot.into_iter().map(|(_, record)| Ok(record)))
        })
        .flatten()
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, mut record: T) -> Result<T, StoreError> {
        let id = record.ensure_id();
        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, record: &T) -> Result<(), StoreError> {
        let id = record.id().ok_or(StoreError::MissingId)?;
        self.records.remove(id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.len() as u64)
    }
}
