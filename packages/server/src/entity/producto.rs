use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::models::categoria::Categoria;
use crate::models::producto::Producto;

/// Category copy stored inline on the product row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CategoriaSnapshot {
    pub id: Option<String>,
    pub nombre: String,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "producto")]
pub struct Model {
    /// UUIDv7 string, assigned on first save.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub nombre: String,
    pub precio: f64,

    /// Copied at save time; later category edits do not reach old rows.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub categoria: Option<CategoriaSnapshot>,

    /// Generated upload filename, relative to the upload directory.
    pub foto: Option<String>,

    pub create_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Categoria> for CategoriaSnapshot {
    fn from(c: Categoria) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre,
        }
    }
}

impl From<CategoriaSnapshot> for Categoria {
    fn from(s: CategoriaSnapshot) -> Self {
        Self {
            id: s.id,
            nombre: s.nombre,
        }
    }
}

impl From<Model> for Producto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            nombre: model.nombre,
            precio: model.precio,
            categoria: model.categoria.map(Into::into),
            foto: model.foto,
            create_at: model.create_at,
        }
    }
}
