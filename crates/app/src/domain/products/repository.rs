//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};

use crate::domain::products::models::{NewProduct, Product, ProductId, ProductUpdate};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const LIST_PRODUCTS_BY_CATEGORY_SQL: &str = include_str!("sql/list_products_by_category.sql");
const LIST_LOW_STOCK_PRODUCTS_SQL: &str = include_str!("sql/list_low_stock_products.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const SET_PRODUCT_QUANTITY_SQL: &str = include_str!("sql/set_product_quantity.sql");
const LOCK_CATALOGUE_SQL: &str = include_str!("sql/lock_catalogue.sql");
const HAS_PRODUCTS_SQL: &str = include_str!("sql/has_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(encode_quantity(product.quantity)?)
            .bind(&product.category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.price)
            .bind(encode_quantity(update.quantity)?)
            .bind(&update.category)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(SEARCH_PRODUCTS_SQL)
            .bind(name)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_BY_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_low_stock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        threshold: u32,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_LOW_STOCK_PRODUCTS_SQL)
            .bind(i64::from(threshold))
            .fetch_all(&mut **tx)
            .await
    }

    /// Load and row-lock the given products until `tx` ends.
    ///
    /// Rows are locked in ascending id order. Ids with no matching row are
    /// simply absent from the result.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductId],
    ) -> Result<Vec<Product>, sqlx::Error> {
        let ids: Vec<i64> = products.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, Product>(LOCK_PRODUCTS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Block other writers to the catalogue until `tx` ends. Reads still pass.
    pub(crate) async fn lock_catalogue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_CATALOGUE_SQL).execute(&mut **tx).await?;

        Ok(())
    }

    pub(crate) async fn has_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        quantity: u32,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(SET_PRODUCT_QUANTITY_SQL)
            .bind(product.into_i64())
            .bind(encode_quantity(quantity)?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        decode_product(row, "")
    }
}

/// Decode a product from `row`, reading every column as `{prefix}{column}`.
///
/// Joined queries alias product columns with a prefix so they can share a row
/// with the record that references the product.
pub(crate) fn decode_product(row: &PgRow, prefix: &str) -> sqlx::Result<Product> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(Product {
        id: ProductId::from_i64(row.try_get(column("id").as_str())?),
        name: row.try_get(column("name").as_str())?,
        description: row.try_get(column("description").as_str())?,
        price: row.try_get(column("price").as_str())?,
        quantity: try_get_quantity(row, &column("quantity"))?,
        category: row.try_get(column("category").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
    })
}

pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn encode_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
