//! Field-level validation for decoded request bodies.
//!
//! Rules are plain data: a field name, a message, and a predicate. They are
//! evaluated in declaration order so error lists are stable across requests.

use std::fmt;

use super::categoria::{Categoria, CategoriaPayload};
use super::producto::{ProductoPayload, ValidProducto};

const NOT_BLANK: &str = "no puede estar vacío";
const NOT_NULL: &str = "no puede ser nulo";

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "El campo {} {}", self.field, self.message)
    }
}

/// A declarative rule over `T`.
pub struct Rule<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub holds: fn(&T) -> bool,
}

/// Evaluate `rules` against `value`, returning every violation in order.
pub fn check<T>(rules: &[Rule<T>], value: &T) -> Vec<FieldViolation> {
    rules
        .iter()
        .filter(|rule| !(rule.holds)(value))
        .map(|rule| FieldViolation {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

fn not_blank(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.trim().is_empty())
}

fn producto_nombre_present(p: &ProductoPayload) -> bool {
    not_blank(p.nombre.as_deref())
}

fn producto_precio_present(p: &ProductoPayload) -> bool {
    p.precio.is_some()
}

fn categoria_nombre_present(c: &CategoriaPayload) -> bool {
    not_blank(c.nombre.as_deref())
}

pub const PRODUCTO_RULES: &[Rule<ProductoPayload>] = &[
    Rule {
        field: "nombre",
        message: NOT_BLANK,
        holds: producto_nombre_present,
    },
    Rule {
        field: "precio",
        message: NOT_NULL,
        holds: producto_precio_present,
    },
];

pub const CATEGORIA_RULES: &[Rule<CategoriaPayload>] = &[Rule {
    field: "nombre",
    message: NOT_BLANK,
    holds: categoria_nombre_present,
}];

/// Validate a product payload and narrow it to its required shape.
pub fn validate_producto(payload: ProductoPayload) -> Result<ValidProducto, Vec<FieldViolation>> {
    let violations = check(PRODUCTO_RULES, &payload);
    match (payload.nombre, payload.precio) {
        (Some(nombre), Some(precio)) if violations.is_empty() => Ok(ValidProducto {
            nombre,
            precio,
            categoria: payload.categoria,
            create_at: payload.create_at,
        }),
        _ => Err(violations),
    }
}

/// Validate a category payload into an unsaved [`Categoria`].
pub fn validate_categoria(payload: CategoriaPayload) -> Result<Categoria, Vec<FieldViolation>> {
    let violations = check(CATEGORIA_RULES, &payload);
    match payload.nombre {
        Some(nombre) if violations.is_empty() => Ok(Categoria::new(nombre)),
        _ => Err(violations),
    }
}
