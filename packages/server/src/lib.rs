pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::{Json, routing::get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Productos API",
        version = "1.0.0",
        description = "CRUD and photo upload for products and their categories"
    ),
    paths(
        handlers::producto::list_productos,
        handlers::producto::get_producto,
        handlers::producto::create_producto,
        handlers::producto::update_producto,
        handlers::producto::delete_producto,
        handlers::producto::upload_foto,
        handlers::producto::create_producto_with_foto,
        handlers::categoria::list_categorias,
        handlers::categoria::get_categoria,
        handlers::categoria::create_categoria,
    ),
    tags(
        (name = "Productos", description = "Product CRUD and photo upload"),
        (name = "Categorias", description = "Product categories"),
    ),
)]
pub struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let api = ApiDoc::openapi();
    let max_upload_size = state.config.storage.max_upload_size;

    routes::api_routes(max_upload_size)
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            get({
                let api = api.clone();
                move || {
                    let api = api.clone();
                    async move { Json(api) }
                }
            }),
        )
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins = config.allow_origins.iter().filter_map(|origin| {
        origin
            .parse::<HeaderValue>()
            .inspect_err(|e| {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin")
            })
            .ok()
    });
    layer.allow_origin(AllowOrigin::list(origins))
}
