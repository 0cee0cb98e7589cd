//! Record store gateway.
//!
//! Thin async persistence seam for the two document types. Implementations
//! assign identifiers on first save and otherwise hold no business rules.

mod memory;
mod postgres;

use async_trait::async_trait;
use futures::stream::BoxStream;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::categoria::Categoria;
use crate::models::producto::Producto;

pub use memory::MemoryStore;
pub use postgres::SeaOrmStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("record has not been persisted yet")]
    MissingId,
}

/// Lazy sequence of records; nothing is fetched until first polled.
pub type RecordStream<T> = BoxStream<'static, Result<T, StoreError>>;

/// A record addressable by a store-assigned string identifier.
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);

    /// Return the existing identifier, minting a fresh one if absent.
    fn ensure_id(&mut self) -> String {
        if let Some(id) = self.id() {
            return id.to_string();
        }
        let id = Uuid::now_v7().to_string();
        self.set_id(id.clone());
        id
    }
}

impl Document for Producto {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Document for Categoria {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[async_trait]
pub trait RecordStore<T: Document>: Send + Sync {
    /// All records, as a lazy stream.
    fn find_all(&self) -> RecordStream<T>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// Insert or overwrite `record`, assigning an id when it has none.
    async fn save(&self, record: T) -> Result<T, StoreError>;

    async fn delete(&self, record: &T) -> Result<(), StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
