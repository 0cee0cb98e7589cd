use std::sync::Arc;

use crate::models::categoria::Categoria;
use crate::models::producto::Producto;
use crate::store::{MemoryStore, RecordStore, RecordStream, StoreError};

/// Pass-through between the HTTP handlers and the record stores.
#[derive(Clone)]
pub struct ProductoService {
    productos: Arc<dyn RecordStore<Producto>>,
    categorias: Arc<dyn RecordStore<Categoria>>,
}

impl ProductoService {
    pub fn new(
        productos: Arc<dyn RecordStore<Producto>>,
        categorias: Arc<dyn RecordStore<Categoria>>,
    ) -> Self {
        Self {
            productos,
            categorias,
        }
    }

    /// A service backed by fresh in-process stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Producto>::new()),
            Arc::new(MemoryStore::<Categoria>::new()),
        )
    }

    pub fn find_all(&self) -> RecordStream<Producto> {
        self.productos.find_all()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Producto>, StoreError> {
        self.productos.find_by_id(id).await
    }

    pub async fn save(&self, producto: Producto) -> Result<Producto, StoreError> {
        self.productos.save(producto).await
    }

    pub async fn delete(&self, producto: &Producto) -> Result<(), StoreError> {
        self.productos.delete(producto).await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.productos.count().await
    }

    pub fn find_all_categorias(&self) -> RecordStream<Categoria> {
        self.categorias.find_all()
    }

    pub async fn find_categoria(&self, id: &str) -> Result<Option<Categoria>, StoreError> {
        self.categorias.find_by_id(id).await
    }

    pub async fn save_categoria(&self, categoria: Categoria) -> Result<Categoria, StoreError> {
        self.categorias.save(categoria).await
    }
}
