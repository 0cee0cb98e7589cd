use std::io::Cursor;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_typed_multipart::FieldData;
use chrono::Utc;
use tracing::{info, instrument, warn};

use common::storage::BoxReader;

use crate::error::{AppError, ErrorBody, ValidationErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::multipart::AppMultipart;
use crate::models::producto::*;
use crate::models::validation::validate_producto;
use crate::routes::PRODUCTOS_PATH;
use crate::state::AppState;
use crate::utils::filename::upload_filename;
use crate::utils::stream::json_array_body;

/// Request body limit for the multipart routes: the largest accepted
/// upload plus room for the text fields and part headers.
pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(upload_body_limit_bytes(max_upload_size))
}

fn upload_body_limit_bytes(max_upload_size: u64) -> usize {
    usize::try_from(max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024)
}

#[utoipa::path(
    get,
    path = "/api/productos",
    tag = "Productos",
    operation_id = "listProductos",
    summary = "List all products",
    description = "Streams every stored product as a JSON array.",
    responses(
        (status = 200, description = "All products", body = Vec<Producto>),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_productos(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_array_body(state.service.find_all()).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    tag = "Productos",
    operation_id = "getProducto",
    summary = "Get a product by ID",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = Producto),
        (status = 404, description = "Product not found (empty body)"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Producto>, AppError> {
    Ok(Json(find_producto(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/productos",
    tag = "Productos",
    operation_id = "createProducto",
    summary = "Create a product",
    description = "Validates the body, defaults `createAt` to now when absent and stores the product. \
        The `Location` header points at the new resource.",
    request_body = ProductoPayload,
    responses(
        (status = 201, description = "Product created", body = ProductoCreatedResponse),
        (status = 400, description = "Validation error", body = ValidationErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_producto(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let valid = validate_producto(payload)?;
    let producto = state.service.save(valid.into_new(Utc::now())).await?;
    let location = producto_location(&producto)?;
    info!(id = %location, "Producto created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductoCreatedResponse {
            producto,
            mensaje: MENSAJE_CREADO.to_string(),
            timestamp: Utc::now(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    tag = "Productos",
    operation_id = "updateProducto",
    summary = "Edit a product",
    description = "Overwrites `nombre`, `precio` and `categoria` of an existing product. \
        `foto` and `createAt` are kept. No locking: the last write wins.",
    params(("id" = String, Path, description = "Product ID")),
    request_body = ProductoPayload,
    responses(
        (status = 201, description = "Product updated", body = Producto),
        (status = 400, description = "Validation error", body = ValidationErrorBody),
        (status = 404, description = "Product not found (empty body)"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut existing = find_producto(&state, &id).await?;
    validate_producto(payload)?.apply_to(&mut existing);

    let producto = state.service.save(existing).await?;
    let location = producto_location(&producto)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(producto),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    tag = "Productos",
    operation_id = "deleteProducto",
    summary = "Delete a product",
    description = "Removes the product record. An uploaded photo stays on disk.",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found (empty body)"),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_producto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let producto = find_producto(&state, &id).await?;
    state.service.delete(&producto).await?;
    info!("Producto deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/productos/upload/{id}",
    tag = "Productos",
    operation_id = "uploadFoto",
    summary = "Upload a product photo",
    description = "Stores the `file` part under a fresh `<uuid>-<sanitized name>` filename and \
        records it as the product's `foto`. A previous photo file is left in place.",
    params(("id" = String, Path, description = "Product ID")),
    request_body(content_type = "multipart/form-data", description = "Photo in the `file` field"),
    responses(
        (status = 200, description = "Photo stored", body = Producto),
        (status = 400, description = "Missing or invalid file part", body = ValidationErrorBody),
        (status = 404, description = "Product not found (empty body)"),
    ),
)]
#[instrument(skip(state, form))]
pub async fn upload_foto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppMultipart(form): AppMultipart<UploadFotoForm>,
) -> Result<Json<Producto>, AppError> {
    let mut producto = find_producto(&state, &id).await?;

    let foto = store_upload(&state, form.file).await?;
    producto.foto = Some(foto.clone());
    let producto = save_with_upload(&state, producto, &foto).await?;

    Ok(Json(producto))
}

#[utoipa::path(
    post,
    path = "/api/productos/create-with-photo",
    tag = "Productos",
    operation_id = "createProductoWithFoto",
    summary = "Create a product together with its photo",
    description = "Multipart fields: `nombre`, `precio`, `categoria.id`, `categoria.nombre` and `file`. \
        The file is written before the record is saved; if the save fails the file is removed.",
    request_body(content_type = "multipart/form-data", description = "Product fields plus the photo"),
    responses(
        (status = 201, description = "Product created", body = Producto),
        (status = 400, description = "Missing, mistyped or invalid field", body = ValidationErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn create_producto_with_foto(
    State(state): State<AppState>,
    AppMultipart(form): AppMultipart<CreateWithFotoForm>,
) -> Result<impl IntoResponse, AppError> {
    let (payload, file) = form.into_parts();
    let mut producto = validate_producto(payload)?.into_new(Utc::now());

    let foto = store_upload(&state, file).await?;
    producto.foto = Some(foto.clone());
    let producto = save_with_upload(&state, producto, &foto).await?;
    let location = producto_location(&producto)?;
    info!(id = %location, foto = %foto, "Producto created with photo");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(producto),
    ))
}

async fn find_producto(state: &AppState, id: &str) -> Result<Producto, AppError> {
    state
        .service
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Canonical resource path for a saved product.
fn producto_location(producto: &Producto) -> Result<String, AppError> {
    let id = producto
        .id
        .as_deref()
        .ok_or_else(|| AppError::Internal("saved producto has no id".into()))?;
    Ok(format!("{PRODUCTOS_PATH}/{id}"))
}

/// Write an uploaded part to the sink and return the generated filename.
async fn store_upload(state: &AppState, file: FieldData<Bytes>) -> Result<String, AppError> {
    let foto = upload_filename(file.metadata.file_name.as_deref());
    let reader: BoxReader = Box::new(Cursor::new(file.contents));
    let size = state.uploads.put_stream(&foto, reader).await?;
    info!(foto = %foto, size, "Photo stored");
    Ok(foto)
}

/// Save a product whose photo was just written. On failure the file is
/// removed again so no orphan is left for a record that never existed.
async fn save_with_upload(
    state: &AppState,
    producto: Producto,
    foto: &str,
) -> Result<Producto, AppError> {
    match state.service.save(producto).await {
        Ok(saved) => Ok(saved),
        Err(e) => {
            // Best effort.
            if let Err(cleanup) = state.uploads.remove(foto).await {
                warn!(foto, error = %cleanup, "Failed to remove photo after save failure");
            }
            Err(e.into())
        }
    }
}
