pub mod categoria;
pub mod producto;
pub mod validation;
