use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Durable sink for uploaded files, addressed by flat filename.
#[async_trait]
pub trait UploadSink: Send + Sync {
    /// Store bytes under `name`.
    async fn put(&self, name: &str, data: &[u8]) -> Result<u64, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(name, reader).await
    }

    /// Drain `reader` into a file called `name` and return the byte count.
    ///
    /// The file becomes visible only once fully written; a failed write
    /// leaves nothing behind under `name`.
    async fn put_stream(&self, name: &str, reader: BoxReader) -> Result<u64, StorageError>;

    /// Remove a file.
    ///
    /// Returns `true` if the file was removed, `false` if it did not exist.
    async fn remove(&self, name: &str) -> Result<bool, StorageError>;
}
