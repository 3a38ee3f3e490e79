use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i32,
    pub establishment_id: i32,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub stock: i32,
    pub min_stock: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn is_low_on_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub establishment_id: i32,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub stock: i32,
    pub min_stock: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    pub price_cents: i64,
    pub min_stock: i32,
    pub active: bool,
}

/// Signed stock adjustment; positive quantities restock, negative ones
/// consume.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStockMovement {
    pub product_id: i32,
    pub quantity: i32,
    pub reason: String,
}
