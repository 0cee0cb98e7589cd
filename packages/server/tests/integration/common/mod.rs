use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sea_orm::DbErr;
use serde_json::Value;
use tempfile::TempDir;

use ::common::storage::FilesystemUploadSink;
use server::config::{
    AppConfig, CorsConfig, DatabaseConfig, SeedConfig, ServerConfig, StorageConfig,
};
use server::models::categoria::Categoria;
use server::models::producto::Producto;
use server::service::ProductoService;
use server::state::AppState;
use server::store::{Document, MemoryStore, RecordStore, RecordStream, StoreError};

pub mod routes {
    pub const PRODUCTOS: &str = "/api/productos";
    pub const LEGACY_PRODUCTOS: &str = "/api/v2/productos";
    pub const READONLY_PRODUCTOS: &str = "/api/v3/productos";
    pub const CREATE_WITH_PHOTO: &str = "/api/productos/create-with-photo";
    pub const CATEGORIAS: &str = "/api/categorias";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn producto(id: &str) -> String {
        format!("/api/productos/{id}")
    }

    pub fn legacy_producto(id: &str) -> String {
        format!("/api/v2/productos/{id}")
    }

    pub fn readonly_producto(id: &str) -> String {
        format!("/api/v3/productos/{id}")
    }

    pub fn upload(id: &str) -> String {
        format!("/api/productos/upload/{id}")
    }

    pub fn categoria(id: &str) -> String {
        format!("/api/categorias/{id}")
    }
}

/// A running test server backed by in-memory stores and a temp upload dir.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub upload_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
    pub location: Option<String>,
    pub content_type: Option<String>,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let header = |name: reqwest::header::HeaderName| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let location = header(reqwest::header::LOCATION);
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            text,
            body,
            location,
            content_type,
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ProductoService::in_memory()).await
    }

    pub async fn spawn_with(service: ProductoService) -> Self {
        Self::spawn_with_upload_limit(service, 1024 * 1024).await
    }

    pub async fn spawn_with_upload_limit(service: ProductoService, max_upload_size: u64) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig::default(),
            storage: StorageConfig {
                upload_path: upload_dir.path().to_path_buf(),
                max_upload_size,
            },
            seed: SeedConfig::default(),
        };

        let uploads = FilesystemUploadSink::new(
            app_config.storage.upload_path.clone(),
            app_config.storage.max_upload_size,
        )
        .await
        .expect("Failed to create upload sink");

        let state = AppState {
            config: app_config,
            service,
            uploads: Arc::new(uploads),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            upload_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// POST a raw body labelled as JSON, for malformed-input cases.
    pub async fn post_raw_json(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// POST a multipart form made of text `fields` plus an optional `file` part.
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, Vec<u8>)>,
    ) -> TestResponse {
        let mut form = Form::new();
        for &(name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }
        if let Some((file_name, bytes)) = file {
            let part = Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str("image/png")
                .expect("Failed to set MIME type");
            form = form.part("file", part);
        }

        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Create a product through the JSON endpoint, returning its id.
    pub async fn create_producto(&self, nombre: &str, precio: f64) -> String {
        let body = serde_json::json!({
            "nombre": nombre,
            "precio": precio,
            "categoria": { "nombre": "Electrónico" },
        });

        let res = self.post_json(routes::PRODUCTOS, &body).await;
        assert_eq!(res.status, 201, "Create failed: {}", res.text);

        res.body["producto"]["id"]
            .as_str()
            .expect("Missing producto.id in create response")
            .to_string()
    }

    /// Names of the files written to the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

/// Product store whose `save` always fails. Reads go to an empty memory store.
pub struct FailingSaveStore {
    inner: MemoryStore<Producto>,
}

impl FailingSaveStore {
    pub fn service() -> ProductoService {
        ProductoService::new(
            Arc::new(Self {
                inner: MemoryStore::new(),
            }),
            Arc::new(MemoryStore::<Categoria>::new()),
        )
    }
}

#[async_trait]
impl RecordStore<Producto> for FailingSaveStore {
    fn find_all(&self) -> RecordStream<Producto> {
        self.inner.find_all()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Producto>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, _record: Producto) -> Result<Producto, StoreError> {
        Err(DbErr::Custom("store unavailable".into()).into())
    }

    async fn delete(&self, record: &Producto) -> Result<(), StoreError> {
        self.inner.delete(record).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}

/// Store whose every operation fails, as when the database is unreachable.
pub struct UnavailableStore;

impl UnavailableStore {
    pub fn service() -> ProductoService {
        ProductoService::new(Arc::new(Self), Arc::new(Self))
    }

    fn error() -> StoreError {
        DbErr::Custom("database unreachable".into()).into()
    }
}

#[async_trait]
impl<T: Document> RecordStore<T> for UnavailableStore {
    fn find_all(&self) -> RecordStream<T> {
        stream::once(async { Err(Self::error()) }).boxed()
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<T>, StoreError> {
        Err(Self::error())
    }

    async fn save(&self, _record: T) -> Result<T, StoreError> {
        Err(Self::error())
    }

    async fn delete(&self, _record: &T) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(Self::error())
    }
}
