use validator::Validate;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::product::{Product, StockMovement};
use crate::forms::inventory::{AddProductForm, StockMovementForm, UpdateProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    low_stock_only: bool,
) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_products(user.establishment_id, low_stock_only)?)
}

pub fn add_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    Ok(repo.create_product(&form.to_new_product(user.establishment_id))?)
}

pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: &UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    repo.get_product_by_id(product_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.update_product(product_id, user.establishment_id, &form.into())?)
}

/// Applies a signed stock movement; consumption past zero is rejected.
pub fn record_stock_movement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: &StockMovementForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    form.validate()?;

    if form.quantity == 0 {
        return Err(ServiceError::Validation(
            "movement quantity cannot be zero".to_string(),
        ));
    }

    let product = repo
        .get_product_by_id(product_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    if product.stock + form.quantity < 0 {
        return Err(ServiceError::Conflict(format!(
            "insufficient stock: {} on hand, movement of {}",
            product.stock, form.quantity
        )));
    }

    Ok(repo.apply_stock_movement(&form.to_new_movement(product_id))?)
}

pub fn list_stock_movements<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Vec<StockMovement>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_product_by_id(product_id, user.establishment_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.list_stock_movements(product_id)?)
}
