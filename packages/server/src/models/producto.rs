use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::categoria::Categoria;

/// Message returned alongside a newly created product.
pub const MENSAJE_CREADO: &str = "Producto creado con éxito";

/// A stored product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    /// Store-assigned identifier; `None` until first saved.
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: Option<String>,
    #[schema(example = "Mouse")]
    pub nombre: String,
    #[schema(example = 25.5)]
    pub precio: f64,
    /// Embedded category snapshot.
    pub categoria: Option<Categoria>,
    /// Generated filename of the uploaded photo.
    #[schema(example = "4f8c2a1e-8d3b-4a56-9f0e-2b7d1c3e5a90-mouse.png")]
    pub foto: Option<String>,
    pub create_at: DateTime<Utc>,
}

/// Decoded product body for create and edit.
///
/// Every field is optional so that missing values surface as field
/// violations rather than decode failures.
#[derive(Debug, Deserialize, Default, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductoPayload {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    pub categoria: Option<Categoria>,
    pub create_at: Option<DateTime<Utc>>,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProducto {
    pub nombre: String,
    pub precio: f64,
    pub categoria: Option<Categoria>,
    pub create_at: Option<DateTime<Utc>>,
}

impl ValidProducto {
    /// Build a fresh, unsaved product. `createAt` falls back to `now`.
    pub fn into_new(self, now: DateTime<Utc>) -> Producto {
        Producto {
            id: None,
            nombre: self.nombre,
            precio: self.precio,
            categoria: self.categoria,
            foto: None,
            create_at: self.create_at.unwrap_or(now),
        }
    }

    /// Overwrite the editable fields of `existing`. `id`, `foto` and
    /// `createAt` are left untouched.
    pub fn apply_to(self, existing: &mut Producto) {
        existing.nombre = self.nombre;
        existing.precio = self.precio;
        existing.categoria = self.categoria;
    }
}

/// Response body for `POST /api/productos`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductoCreatedResponse {
    pub producto: Producto,
    #[schema(example = "Producto creado con éxito")]
    pub mensaje: String,
    pub timestamp: DateTime<Utc>,
}

/// Multipart body for `POST /api/productos/upload/{id}`.
#[derive(TryFromMultipart)]
pub struct UploadFotoForm {
    #[form_data(limit = "unlimited")]
    pub file: FieldData<Bytes>,
}

/// Multipart body for `POST /api/productos/create-with-photo`.
#[derive(TryFromMultipart)]
pub struct CreateWithFotoForm {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    #[form_data(field_name = "categoria.id")]
    pub categoria_id: Option<String>,
    #[form_data(field_name = "categoria.nombre")]
    pub categoria_nombre: Option<String>,
    #[form_data(limit = "unlimited")]
    pub file: FieldData<Bytes>,
}

impl CreateWithFotoForm {
    /// Split the form into the product payload and the file part.
    pub fn into_parts(self) -> (ProductoPayload, FieldData<Bytes>) {
        let categoria = match (self.categoria_id, self.categoria_nombre) {
            (None, None) => None,
            (id, nombre) => Some(Categoria {
                id: id.filter(|s| !s.trim().is_empty()),
                nombre: nombre.unwrap_or_default(),
            }),
        };
        let payload = ProductoPayload {
            nombre: self.nombre,
            precio: self.precio,
            categoria,
            create_at: None,
        };
        (payload, self.file)
    }
}
