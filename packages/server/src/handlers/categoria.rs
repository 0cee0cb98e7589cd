use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, ValidationErrorBody};
use crate::extractors::json::AppJson;
use crate::models::categoria::{Categoria, CategoriaPayload};
use crate::models::validation::validate_categoria;
use crate::routes::CATEGORIAS_PATH;
use crate::state::AppState;
use crate::utils::stream::json_array_body;

#[utoipa::path(
    get,
    path = "/api/categorias",
    tag = "Categorias",
    operation_id = "listCategorias",
    summary = "List all categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Categoria>),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categorias(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_array_body(state.service.find_all_categorias()).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    tag = "Categorias",
    operation_id = "getCategoria",
    summary = "Get a category by ID",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Categoria),
        (status = 404, description = "Category not found (empty body)"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_categoria(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Categoria>, AppError> {
    let categoria = state
        .service
        .find_categoria(&id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(categoria))
}

#[utoipa::path(
    post,
    path = "/api/categorias",
    tag = "Categorias",
    operation_id = "createCategoria",
    summary = "Create a category",
    description = "Products copy the category at the time they are saved; later changes here do not reach them.",
    request_body = CategoriaPayload,
    responses(
        (status = 201, description = "Category created", body = Categoria),
        (status = 400, description = "Validation error", body = ValidationErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_categoria(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let categoria = state
        .service
        .save_categoria(validate_categoria(payload)?)
        .await?;
    let id = categoria
        .id
        .as_deref()
        .ok_or_else(|| AppError::Internal("saved categoria has no id".into()))?;
    let location = format!("{CATEGORIAS_PATH}/{id}");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(categoria),
    ))
}
