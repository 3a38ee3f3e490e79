use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, NewStockMovement, UpdateProduct};

#[derive(Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0))]
    pub min_stock: i32,
}

impl AddProductForm {
    pub fn to_new_product(&self, establishment_id: i32) -> NewProduct {
        NewProduct {
            establishment_id,
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            price_cents: self.price_cents,
            stock: self.stock,
            min_stock: self.min_stock,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0))]
    pub min_stock: i32,
    pub active: bool,
}

impl From<&UpdateProductForm> for UpdateProduct {
    fn from(form: &UpdateProductForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            price_cents: form.price_cents,
            min_stock: form.min_stock,
            active: form.active,
        }
    }
}

#[derive(Deserialize, Validate)]
/// Signed adjustment; rejected by the service when it would drive stock
/// negative.
pub struct StockMovementForm {
    pub quantity: i32,
    #[validate(length(min = 1))]
    pub reason: String,
}

impl StockMovementForm {
    pub fn to_new_movement(&self, product_id: i32) -> NewStockMovement {
        NewStockMovement {
            product_id,
            quantity: self.quantity,
            reason: self.reason.trim().to_string(),
        }
    }
}
