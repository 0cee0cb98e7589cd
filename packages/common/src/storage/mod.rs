mod error;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FilesystemUploadSink;
pub use traits::{BoxReader, UploadSink};
