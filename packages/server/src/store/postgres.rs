use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::{Document, RecordStore, RecordStream, StoreError};
use crate::entity::{categoria, producto};
use crate::models::categoria::Categoria;
use crate::models::producto::Producto;

/// PostgreSQL-backed store. Products keep their category as a JSONB column.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Rows fetched per query while listing.
const PAGE_SIZE: u64 = 100;

/// Stream every row of `E` in ascending `id` order, one page per query.
///
/// Pages are keyed on the last id seen rather than an offset, so rows
/// inserted while the stream is being read cannot shift a page boundary.
fn keyset_stream<E, T>(
    db: DatabaseConnection,
    id: E::Column,
    key: fn(&E::Model) -> String,
    page_size: u64,
) -> RecordStream<T>
where
    E: EntityTrait + Send + Sync + 'static,
    E::Column: Send + Sync + 'static,
    E::Model: Send + Sync + 'static,
    T: From<E::Model> + Send + 'static,
{
    stream::try_unfold(Some((db, None::<String>)), move |cursor| async move {
        let Some((db, after)) = cursor else {
            return Ok::<_, StoreError>(None);
        };

        let mut query = E::find().order_by_asc(id).limit(page_size);
        if let Some(after) = after {
            query = query.filter(id.gt(after));
        }
        let page = query.all(&db).await?;

        let next = if (page.len() as u64) < page_size {
            None
        } else {
            page.last().map(key).map(|last| (db, Some(last)))
        };
        Ok(Some((page, next)))
    })
    .map_ok(|page| stream::iter(page.into_iter().map(|m| Ok(T::from(m)))))
    .try_flatten()
    .boxed()
}

#[async_trait]
impl RecordStore<Producto> for SeaOrmStore {
    fn find_all(&self) -> RecordStream<Producto> {
        keyset_stream::<producto::Entity, Producto>(
            self.db.clone(),
            producto::Column::Id,
            |m| m.id.clone(),
            PAGE_SIZE,
        )
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Producto>, StoreError> {
        let model = producto::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, mut record: Producto) -> Result<Producto, StoreError> {
        let id = record.ensure_id();
        let active = producto::ActiveModel {
            id: Set(id),
            nombre: Set(record.nombre.clone()),
            precio: Set(record.precio),
            categoria: Set(record.categoria.clone().map(Into::into)),
            foto: Set(record.foto.clone()),
            create_at: Set(record.create_at),
        };

        producto::Entity::insert(active)
            .on_conflict(
                OnConflict::column(producto::Column::Id)
                    .update_columns([
                        producto::Column::Nombre,
                        producto::Column::Precio,
                        producto::Column::Categoria,
                        producto::Column::Foto,
                        producto::Column::CreateAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(record)
    }

    async fn delete(&self, record: &Producto) -> Result<(), StoreError> {
        let id = record.id().ok_or(StoreError::MissingId)?;
        producto::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(producto::Entity::find().count(&self.db).await?)
    }
}

#[async_trait]
impl RecordStore<Categoria> for SeaOrmStore {
    fn find_all(&self) -> RecordStream<Categoria> {
        keyset_stream::<categoria::Entity, Categoria>(
            self.db.clone(),
            categoria::Column::Id,
            |m| m.id.clone(),
            PAGE_SIZE,
        )
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Categoria>, StoreError> {
        let model = categoria::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, mut record: Categoria) -> Result<Categoria, StoreError> {
        let id = record.ensure_id();
        let active = categoria::ActiveModel {
            id: Set(id),
            nombre: Set(record.nombre.clone()),
        };

        categoria::Entity::insert(active)
            .on_conflict(
                OnConflict::column(categoria::Column::Id)
                    .update_column(categoria::Column::Nombre)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(record)
    }

    async fn delete(&self, record: &Categoria) -> Result<(), StoreError> {
        let id = record.id().ok_or(StoreError::MissingId)?;
        categoria::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(categoria::Entity::find().count(&self.db).await?)
    }
}
