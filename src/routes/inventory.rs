use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::inventory::{AddProductForm, StockMovementForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::services::errors::ServiceError;
use crate::services::inventory;

#[derive(Deserialize)]
struct ProductsQueryParams {
    #[serde(default)]
    low_stock: bool,
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = inventory::list_products(repo.get_ref(), &user, params.low_stock)?;
    Ok(HttpResponse::Ok().json(data))
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddProductForm>,
) -> Result<HttpResponse, ServiceError> {
    let product = inventory::add_product(repo.get_ref(), &user, &form)?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/products/{product_id}")]
pub async fn save_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateProductForm>,
) -> Result<HttpResponse, ServiceError> {
    let product = inventory::update_product(repo.get_ref(), &user, product_id.into_inner(), &form)?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("/products/{product_id}/movements")]
pub async fn add_stock_movement(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<StockMovementForm>,
) -> Result<HttpResponse, ServiceError> {
    let product =
        inventory::record_stock_movement(repo.get_ref(), &user, product_id.into_inner(), &form)?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/products/{product_id}/movements")]
pub async fn list_stock_movements(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let data = inventory::list_stock_movements(repo.get_ref(), &user, product_id.into_inner())?;
    Ok(HttpResponse::Ok().json(data))
}
