use tracing::info;

use crate::models::categoria::Categoria;
use crate::models::producto::Producto;
use crate::service::ProductoService;
use crate::store::StoreError;

/// Demo categories, by name.
const CATEGORIAS: &[&str] = &["Electrónico", "Deporte", "Computación", "Muebles"];

/// Demo products: (nombre, precio, index into `CATEGORIAS`).
const PRODUCTOS: &[(&str, f64, usize)] = &[
    ("TV Panasonic Pantalla LCD", 456.89, 0),
    ("Sony Camara HD Digital", 177.89, 0),
    ("Apple iPod", 46.89, 0),
    ("Sony Notebook", 846.89, 2),
    ("Hewlett Packard Multifuncional", 200.89, 2),
    ("Bianchi Bicicleta", 70.89, 1),
    ("HP Notebook Omen 17", 2500.89, 2),
    ("Mica Cómoda 5 Cajones", 150.89, 3),
    ("TV Sony Bravia OLED 4K Ultra HD", 2255.89, 0),
];

/// Insert the demo catalogue if no product exists yet.
///
/// Returns the number of products inserted.
pub async fn seed_catalogue(service: &ProductoService) -> Result<usize, StoreError> {
    if service.count().await? > 0 {
        info!("Product collection not empty, skipping seed");
        return Ok(0);
    }

    let mut categorias = Vec::with_capacity(CATEGORIAS.len());
    for &nombre in CATEGORIAS {
        categorias.push(service.save_categoria(Categoria::new(nombre)).await?);
    }

    let now = chrono::Utc::now();
    for &(nombre, precio, categoria) in PRODUCTOS {
        service
            .save(Producto {
                id: None,
                nombre: nombre.to_string(),
                precio,
                categoria: Some(categorias[categoria].clone()),
                foto: None,
                create_at: now,
            })
            .await?;
    }

    info!(
        categorias = categorias.len(),
        productos = PRODUCTOS.len(),
        "Seeded demo catalogue"
    );
    Ok(PRODUCTOS.len())
}
