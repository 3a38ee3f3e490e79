use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, NewStockMovement as DomainNewStockMovement,
    Product as DomainProduct, StockMovement as DomainStockMovement,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub establishment_id: i32,
    pub name: &'a str,
    pub sku: &'a str,
    pub price_cents: i64,
    pub stock: i32,
    pub min_stock: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub price_cents: i64,
    pub min_stock: i32,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::stock_movements)]
pub struct StockMovement {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stock_movements)]
pub struct NewStockMovement<'a> {
    pub product_id: i32,
    pub quantity: i32,
    pub reason: &'a str,
}

impl From<Product> for DomainProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            establishment_id: product.establishment_id,
            name: product.name,
            sku: product.sku,
            price_cents: product.price_cents,
            stock: product.stock,
            min_stock: product.min_stock,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            establishment_id: product.establishment_id,
            name: product.name.as_str(),
            sku: product.sku.as_str(),
            price_cents: product.price_cents,
            stock: product.stock,
            min_stock: product.min_stock,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(product: &'a DomainUpdateProduct) -> Self {
        Self {
            name: product.name.as_str(),
            price_cents: product.price_cents,
            min_stock: product.min_stock,
            active: product.active,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<StockMovement> for DomainStockMovement {
    fn from(movement: StockMovement) -> Self {
        Self {
            id: movement.id,
            product_id: movement.product_id,
            quantity: movement.quantity,
            reason: movement.reason,
            created_at: movement.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewStockMovement> for NewStockMovement<'a> {
    fn from(movement: &'a DomainNewStockMovement) -> Self {
        Self {
            product_id: movement.product_id,
            quantity: movement.quantity,
            reason: movement.reason.as_str(),
        }
    }
}
