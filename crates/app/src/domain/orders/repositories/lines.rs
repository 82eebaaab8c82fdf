//! Order Lines Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::models::{OrderId, OrderLine, OrderLineId},
    products::{
        models::ProductId,
        repository::{decode_product, encode_quantity, try_get_quantity},
    },
};

const CREATE_ORDER_LINE_SQL: &str = include_str!("../sql/create_order_line.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("../sql/list_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        position: u32,
        product: ProductId,
        quantity: u32,
        price: Decimal,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_LINE_SQL)
            .bind(order.into_i64())
            .bind(encode_quantity(position)?)
            .bind(product.into_i64())
            .bind(encode_quantity(quantity)?)
            .bind(price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Lines of every order in `orders`, grouped by order and in position order.
    pub(crate) async fn list_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderId],
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        let ids: Vec<i64> = orders.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, OrderLine>(LIST_ORDER_LINES_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderLineId::from_i64(row.try_get("id")?),
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            position: try_get_quantity(row, "position")?,
            product: decode_product(row, "product_")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get("price")?,
        })
    }
}
