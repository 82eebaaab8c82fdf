//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductId, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        found.ok_or(ProductsServiceError::NotFound(product))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        tracing::info!(product_id = %created.id, name = %created.name, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?
            .ok_or(ProductsServiceError::NotFound(product))?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, product)
            .await
            .map_err(|error| ProductsServiceError::from(error).on_delete(product))?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound(product));
        }

        tx.commit().await?;

        Ok(())
    }

    async fn search_products(&self, name: String) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.search_products(&mut tx, &name).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_by_category(
        &self,
        category: String,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_products_by_category(&mut tx, &category)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_low_stock_products(
        &self,
        threshold: u32,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_low_stock_products(&mut tx, threshold)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_products_if_empty(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.lock_catalogue(&mut tx).await?;

        if self.repository.has_products(&mut tx).await? {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(products.len());

        for product in &products {
            created.push(self.repository.create_product(&mut tx, product).await?);
        }

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a new product, stamping its timestamps.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Overwrites every mutable field of a product.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product that no order line references.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;

    /// Products whose name contains `name`, ignoring case.
    async fn search_products(&self, name: String) -> Result<Vec<Product>, ProductsServiceError>;

    /// Products in exactly `category`.
    async fn list_products_by_category(
        &self,
        category: String,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Products with fewer than `threshold` units on hand.
    async fn list_low_stock_products(
        &self,
        threshold: u32,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Inserts `products` in one transaction, or nothing when the catalogue
    /// already has any product.
    async fn create_products_if_empty(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_stamps_timestamps() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product("Laptop", Decimal::new(1299_99, 2), 10))
            .await?;

        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price, Decimal::new(1299_99, 2));
        assert_eq!(product.quantity, 10);
        assert_eq!(product.created_at, product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_products_if_empty_inserts_batch_once() -> TestResult {
        let ctx = TestContext::new().await;

        let batch = || {
            vec![
                new_product("Laptop", Decimal::new(1299_99, 2), 10),
                new_product("Keyboard", Decimal::new(120_00, 2), 25),
            ]
        };

        let created = ctx.products.create_products_if_empty(batch()).await?;

        assert_eq!(created.len(), 2);

        let again = ctx.products.create_products_if_empty(batch()).await?;

        assert!(again.is_empty(), "populated catalogue should be left alone");
        assert_eq!(ctx.products.list_products().await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn create_products_if_empty_keeps_nothing_when_one_insert_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_products_if_empty(vec![
                new_product("Laptop", Decimal::new(1299_99, 2), 10),
                new_product("Overflow", Decimal::ONE, u32::MAX),
            ])
            .await;

        assert!(result.is_err(), "expected the second insert to fail");
        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .products
            .create_product(new_product("Monitor", Decimal::new(350_00, 2), 8))
            .await?;

        let product = ctx.products.get_product(created.id).await?;

        assert_eq!(product, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;
        let missing = ProductId::from_i64(999);

        let result = ctx.products.get_product(missing).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound(id)) if id == missing),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_returns_products_in_id_order() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx
            .products
            .create_product(new_product("A", Decimal::ONE, 1))
            .await?;
        let b = ctx
            .products
            .create_product(new_product("B", Decimal::new(2, 0), 2))
            .await?;

        let ids: Vec<ProductId> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![a.id, b.id]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products().await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_overwrites_fields_and_refreshes_updated_at() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .products
            .create_product(new_product("Keyboard", Decimal::new(120_00, 2), 25))
            .await?;

        let updated = ctx
            .products
            .update_product(
                created.id,
                ProductUpdate {
                    name: "Mechanical Keyboard".to_string(),
                    description: "Tactile switches".to_string(),
                    price: Decimal::new(135_50, 2),
                    quantity: 12,
                    category: "Peripherals".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Mechanical Keyboard");
        assert_eq!(updated.description, "Tactile switches");
        assert_eq!(updated.price, Decimal::new(135_50, 2));
        assert_eq!(updated.quantity, 12);
        assert_eq!(updated.category, "Peripherals");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductId::from_i64(404),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    description: String::new(),
                    price: Decimal::ONE,
                    quantity: 1,
                    category: String::new(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product("Headphones", Decimal::new(249_99, 2), 20))
            .await?;

        ctx.products.delete_product(product.id).await?;

        let result = ctx.products.get_product(product.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound(_))),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductId::from_i64(404)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn search_products_matches_substring_ignoring_case() -> TestResult {
        let ctx = TestContext::new().await;

        let laptop = ctx
            .products
            .create_product(new_product("Gaming Laptop", Decimal::ONE, 1))
            .await?;
        ctx.products
            .create_product(new_product("Monitor", Decimal::ONE, 1))
            .await?;

        let found = ctx.products.search_products("LAPTOP".to_string()).await?;

        assert_eq!(found.len(), 1, "expected exactly one match");
        assert_eq!(found.first().map(|p| p.id), Some(laptop.id));

        Ok(())
    }

    #[tokio::test]
    async fn search_products_treats_wildcards_literally() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(new_product("Monitor", Decimal::ONE, 1))
            .await?;

        let found = ctx.products.search_products("%".to_string()).await?;

        assert!(found.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_by_category_is_exact_match() -> TestResult {
        let ctx = TestContext::new().await;

        let mut electronics = new_product("Laptop", Decimal::ONE, 1);
        electronics.category = "Electronics".to_string();

        let mut accessories = new_product("Headphones", Decimal::ONE, 1);
        accessories.category = "Accessories".to_string();

        let laptop = ctx.products.create_product(electronics).await?;
        ctx.products.create_product(accessories).await?;

        let found = ctx
            .products
            .list_products_by_category("Electronics".to_string())
            .await?;
        let partial = ctx
            .products
            .list_products_by_category("Electro".to_string())
            .await?;

        assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![laptop.id]);
        assert!(partial.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_low_stock_products_is_strictly_below_threshold() -> TestResult {
        let ctx = TestContext::new().await;

        let scarce = ctx
            .products
            .create_product(new_product("Scarce", Decimal::ONE, 2))
            .await?;
        ctx.products
            .create_product(new_product("Borderline", Decimal::ONE, 5))
            .await?;
        ctx.products
            .create_product(new_product("Plenty", Decimal::ONE, 50))
            .await?;

        let low = ctx.products.list_low_stock_products(5).await?;

        assert_eq!(low.iter().map(|p| p.id).collect::<Vec<_>>(), vec![scarce.id]);

        Ok(())
    }
}
