use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::categoria::Categoria;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categoria")]
pub struct Model {
    /// UUIDv7 string, assigned on first save.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub nombre: String,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Categoria {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            nombre: model.nombre,
        }
    }
}
