use std::sync::Arc;

use common::storage::UploadSink;

use crate::config::AppConfig;
use crate::service::ProductoService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub service: ProductoService,
    pub uploads: Arc<dyn UploadSink>,
}
