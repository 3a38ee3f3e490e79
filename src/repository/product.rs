use diesel::prelude::*;

use crate::domain::product::{NewProduct, NewStockMovement, Product, StockMovement, UpdateProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        product_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(product_id)
            .filter(products::establishment_id.eq(establishment_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(
        &self,
        establishment_id: i32,
        low_stock_only: bool,
    ) -> RepositoryResult<Vec<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let mut q = products::table
            .filter(products::establishment_id.eq(establishment_id))
            .into_boxed();
        if low_stock_only {
            q = q.filter(products::stock.le(products::min_stock));
        }

        let items = q
            .order(products::name.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn list_stock_movements(&self, product_id: i32) -> RepositoryResult<Vec<StockMovement>> {
        use crate::models::product::StockMovement as DbStockMovement;
        use crate::schema::stock_movements;

        let mut conn = self.conn()?;
        let items = stock_movements::table
            .filter(stock_movements::product_id.eq(product_id))
            .order(stock_movements::created_at.desc())
            .load::<DbStockMovement>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();
        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        establishment_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::models::product::{Product as DbProduct, UpdateProduct as DbUpdateProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProduct = updates.into();

        let updated = diesel::update(
            products::table
                .find(product_id)
                .filter(products::establishment_id.eq(establishment_id)),
        )
        .set(&db_updates)
        .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn apply_stock_movement(&self, movement: &NewStockMovement) -> RepositoryResult<Product> {
        use crate::models::product::{
            NewStockMovement as DbNewStockMovement, Product as DbProduct,
        };
        use crate::schema::{products, stock_movements};

        let mut conn = self.conn()?;
        let insertable: DbNewStockMovement = movement.into();

        conn.transaction::<Product, RepositoryError, _>(|conn| {
            diesel::insert_into(stock_movements::table)
                .values(&insertable)
                .execute(conn)?;

            let updated = diesel::update(products::table.find(movement.product_id))
                .set((
                    products::stock.eq(products::stock + movement.quantity),
                    products::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .get_result::<DbProduct>(conn)?;

            Ok(updated.into())
        })
    }
}
