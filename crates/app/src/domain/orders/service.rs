//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderId, OrderLine},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
            reservation::StockReservation,
        },
        products::{models::ProductId, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    lines: PgOrderLinesRepository,
    products: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            lines: PgOrderLinesRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Fill in the lines of each order in `orders`.
    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<Order>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let ids: Vec<OrderId> = orders.iter().map(|order| order.id).collect();

        let mut lines_by_order: FxHashMap<OrderId, Vec<OrderLine>> = FxHashMap::default();

        for line in self.lines.list_order_lines(tx, &ids).await? {
            lines_by_order.entry(line.order_id).or_default().push(line);
        }

        for order in &mut orders {
            order.lines = lines_by_order.remove(&order.id).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn with_lines_one(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Order,
    ) -> Result<Order, OrdersServiceError> {
        let id = order.id;

        self.with_lines(tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::OrderNotFound(id))
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        if order.lines.is_empty() {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let mut product_ids: Vec<ProductId> =
            order.lines.iter().map(|line| line.product_id).collect();

        product_ids.sort_unstable();
        product_ids.dedup();

        let locked = self.products.lock_products(&mut tx, &product_ids).await?;

        let reservation = StockReservation::new(locked)
            .reserve_all(&order.lines)
            .inspect_err(|error| {
                tracing::warn!(reason = error.rejection_reason(), "rejected order: {error}");
            })?;

        for (product, quantity) in &reservation.remaining {
            self.products
                .set_quantity(&mut tx, *product, *quantity)
                .await?;
        }

        let created = self
            .orders
            .create_order(&mut tx, &order, reservation.total_amount)
            .await?;

        for (position, line) in (0_u32..).zip(&reservation.lines) {
            self.lines
                .create_order_line(
                    &mut tx,
                    created.id,
                    position,
                    line.product_id,
                    line.quantity,
                    line.price,
                )
                .await?;
        }

        let created = self.with_lines_one(&mut tx, created).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %created.id,
            lines = created.lines.len(),
            total_amount = %created.total_amount,
            "created order"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self
            .orders
            .get_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound(order))?;

        let found = self.with_lines_one(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_orders(&mut tx).await?;
        let orders = self.with_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn find_by_status(&self, status: String) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_orders_by_status(&mut tx, &status).await?;
        let orders = self.with_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn find_by_customer_email(
        &self,
        email: String,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders
            .list_orders_by_customer_email(&mut tx, &email)
            .await?;
        let orders = self.with_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders
            .list_orders_by_date_range(&mut tx, start, end)
            .await?;
        let orders = self.with_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .orders
            .update_order_status(&mut tx, order, &status)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound(order))?;

        let updated = self.with_lines_one(&mut tx, updated).await?;

        tx.commit().await?;

        tracing::info!(order_id = %order, status = %updated.status, "updated order status");

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.orders.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::OrderNotFound(order));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order, reserving stock for every line.
    ///
    /// Lines are checked in the order given, each against the stock left by
    /// the lines before it. Product quantities, the order and its lines are
    /// written together, or not at all.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::ProductNotFound`] for the first line naming an unknown product.
    /// - [`OrdersServiceError::InsufficientStock`] for the first line that does not fit.
    /// - [`OrdersServiceError::MissingRequiredData`] when the order has no lines.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its lines.
    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError>;

    /// Retrieves all orders.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders whose status is exactly `status`.
    async fn find_by_status(&self, status: String) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders placed by `email`.
    async fn find_by_customer_email(&self, email: String)
    -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders placed between `start` and `end`, both inclusive.
    async fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Set the status of an order, whatever it was before.
    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError>;

    /// Delete an order and its lines. Stock is not returned to products.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;
}
