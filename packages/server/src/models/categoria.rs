use serde::{Deserialize, Serialize};

/// A product category.
///
/// Products embed a copy of their category, so editing a category later
/// never rewrites products that were saved with the old value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Categoria {
    /// Store-assigned identifier; `None` until first saved.
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    #[serde(default)]
    pub id: Option<String>,
    #[schema(example = "Electrónico")]
    pub nombre: String,
}

impl Categoria {
    pub fn new(nombre: impl Into<String>) -> Self {
        Self {
            id: None,
            nombre: nombre.into(),
        }
    }
}

/// Request body for creating a category.
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct CategoriaPayload {
    pub nombre: Option<String>,
}
