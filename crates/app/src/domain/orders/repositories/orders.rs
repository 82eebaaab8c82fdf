//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::orders::models::{NewOrder, Order, OrderId};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const LIST_ORDERS_BY_STATUS_SQL: &str = include_str!("../sql/list_orders_by_status.sql");
const LIST_ORDERS_BY_CUSTOMER_EMAIL_SQL: &str =
    include_str!("../sql/list_orders_by_customer_email.sql");
const LIST_ORDERS_BY_DATE_RANGE_SQL: &str = include_str!("../sql/list_orders_by_date_range.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header. Lines are written separately.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        total_amount: Decimal,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(&order.customer_name)
            .bind(&order.customer_email)
            .bind(&order.status)
            .bind(total_amount)
            .bind(SqlxTimestamp::from(order.order_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: &str,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_BY_STATUS_SQL)
            .bind(status)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_customer_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_BY_CUSTOMER_EMAIL_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }

    /// Orders placed between `start` and `end`, both inclusive.
    pub(crate) async fn list_orders_by_date_range(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_BY_DATE_RANGE_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_i64())
            .bind(status)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            status: row.try_get("status")?,
            total_amount: row.try_get("total_amount")?,
            order_date: row.try_get::<SqlxTimestamp, _>("order_date")?.to_jiff(),
            lines: Vec::new(),
        })
    }
}
