use std::sync::Arc;

use anyhow::Context;
use tracing::{Level, info, warn};

use common::storage::FilesystemUploadSink;
use server::config::AppConfig;
use server::database::init_db;
use server::service::ProductoService;
use server::state::AppState;
use server::store::SeaOrmStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let service = match config.database.url.as_deref() {
        Some(url) => {
            let db = init_db(url).await.context("Failed to connect to database")?;
            let store = SeaOrmStore::new(db);
            ProductoService::new(Arc::new(store.clone()), Arc::new(store))
        }
        None => {
            warn!("database.url not set, records are kept in memory only");
            ProductoService::in_memory()
        }
    };

    let uploads = FilesystemUploadSink::new(
        config.storage.upload_path.clone(),
        config.storage.max_upload_size,
    )
    .await
    .context("Failed to prepare upload directory")?;
    info!(path = %config.storage.upload_path.display(), "Upload directory ready");

    if config.seed.enabled {
        server::seed::seed_catalogue(&service)
            .await
            .context("Failed to seed catalogue")?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config,
        service,
        uploads: Arc::new(uploads),
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
