pub mod categoria;
pub mod producto;
