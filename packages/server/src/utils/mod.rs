pub mod filename;
pub mod stream;
