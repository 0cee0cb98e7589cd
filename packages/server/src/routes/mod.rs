use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Canonical product prefix; every `Location` header points here.
pub const PRODUCTOS_PATH: &str = "/api/productos";
/// Older clients still call this prefix. It serves the same table.
pub const LEGACY_PRODUCTOS_PATH: &str = "/api/v2/productos";
/// Read-only alias: list and get only.
pub const READONLY_PRODUCTOS_PATH: &str = "/api/v3/productos";
pub const CATEGORIAS_PATH: &str = "/api/categorias";

/// All API routes. `max_upload_size` sizes the body limit of the multipart routes.
pub fn api_routes(max_upload_size: u64) -> Router<AppState> {
    Router::new()
        .nest(PRODUCTOS_PATH, producto_routes(max_upload_size))
        .nest(LEGACY_PRODUCTOS_PATH, producto_routes(max_upload_size))
        .nest(READONLY_PRODUCTOS_PATH, producto_read_routes())
        .nest(CATEGORIAS_PATH, categoria_routes())
}

fn producto_read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::producto::list_productos))
        .route("/{id}", get(handlers::producto::get_producto))
}

fn producto_routes(max_upload_size: u64) -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::producto::list_productos).post(handlers::producto::create_producto),
        )
        .route(
            "/{id}",
            get(handlers::producto::get_producto)
                .put(handlers::producto::update_producto)
                .delete(handlers::producto::delete_producto),
        );

    let upload = Router::new()
        .route("/upload/{id}", post(handlers::producto::upload_foto))
        .route(
            "/create-with-photo",
            post(handlers::producto::create_producto_with_foto),
        )
        // Older create-with-photo paths.
        .route("/v2", post(handlers::producto::create_producto_with_foto))
        .route("/crear", post(handlers::producto::create_producto_with_foto))
        .layer(handlers::producto::upload_body_limit(max_upload_size));

    crud.merge(upload)
}

fn categoria_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::categoria::list_categorias).post(handlers::categoria::create_categoria),
        )
        .route("/{id}", get(handlers::categoria::get_categoria))
}
