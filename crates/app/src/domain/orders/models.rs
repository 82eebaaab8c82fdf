//! Order Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::products::models::{Product, ProductId},
    ids::TypedId,
};

/// Status given to orders created without an explicit one.
pub const DEFAULT_ORDER_STATUS: &str = "NEW";

/// Order ID
pub type OrderId = TypedId<Order>;

/// Order Line ID
pub type OrderLineId = TypedId<OrderLine>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub total_amount: Decimal,
    pub order_date: Timestamp,
    pub lines: Vec<OrderLine>,
}

/// Order Line Model
///
/// `order_id` is a lookup key only; lines are owned by, and only ever
/// persisted or removed together with, their order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub position: u32,
    pub product: Product,
    pub quantity: u32,
    pub price: Decimal,
}

/// New Order Model
///
/// Status and order date are defaulted once, at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub order_date: Timestamp,
    pub lines: Vec<NewOrderLine>,
}

impl NewOrder {
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        lines: Vec<NewOrderLine>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            status: DEFAULT_ORDER_STATUS.to_string(),
            order_date: Timestamp::now(),
            lines,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_order_date(mut self, order_date: Timestamp) -> Self {
        self.order_date = order_date;
        self
    }
}

/// New Order Line Model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}
