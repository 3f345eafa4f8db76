use serde::Deserialize;

use pantry_catalog::NewProduct;

/// Body for `POST /products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub quantity: i64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(body: CreateProductRequest) -> Self {
        NewProduct::new(body.name, body.unit).with_quantity(body.quantity)
    }
}
