//! Order request and response bodies.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use stockroom_app::domain::{
    orders::models::{NewOrder, NewOrderLine, Order, OrderLine},
    products::models::ProductId,
};

use crate::{
    errors::{ApiError, ValidationErrors},
    extensions::parse_date_time,
    products::models::ProductResponse,
};

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineResponse {
    pub id: i64,

    /// The product as it stood when the order was read
    pub product: ProductResponse,

    pub quantity: u32,

    /// Unit price captured when the order was placed
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id.into_i64(),
            product: line.product.into(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Order identifier
    pub id: i64,

    pub customer_name: String,

    pub customer_email: String,

    pub status: String,

    /// Sum of every line's captured price times its quantity
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,

    /// When the order was placed
    pub order_date: String,

    /// Lines in the order they were requested
    pub items: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_i64(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            status: order.status,
            total_amount: order.total_amount,
            order_date: order.order_date.to_string(),
            items: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Requested order line
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct OrderItemRequest {
    pub product_id: Option<i64>,

    /// Units wanted, at least one
    pub quantity: Option<i64>,
}

/// Create Order Request
///
/// Any total sent by the client is ignored; it is always computed from the
/// lines.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CreateOrderRequest {
    pub customer_name: Option<String>,

    pub customer_email: Option<String>,

    /// Defaults to `NEW`
    pub status: Option<String>,

    /// ISO-8601 date-time, defaults to now. Values without an offset are UTC.
    pub order_date: Option<String>,

    pub items: Option<Vec<OrderItemRequest>>,
}

impl OrderItemRequest {
    fn validate(&self, index: usize, errors: &mut ValidationErrors) -> Option<NewOrderLine> {
        let quantity = self
            .quantity
            .and_then(|quantity| i32::try_from(quantity).ok())
            .and_then(|quantity| u32::try_from(quantity).ok())
            .filter(|quantity| *quantity > 0);

        errors
            .check(
                self.product_id.is_none(),
                &format!("items[{index}].productId"),
                "Product id is required",
            )
            .check(
                self.quantity.is_none_or(|quantity| quantity < 1),
                &format!("items[{index}].quantity"),
                "Quantity must be at least 1",
            )
            .check(
                self.quantity.is_some_and(|quantity| quantity >= 1) && quantity.is_none(),
                &format!("items[{index}].quantity"),
                "Quantity is too large",
            );

        Some(NewOrderLine {
            product_id: ProductId::from_i64(self.product_id?),
            quantity: quantity?,
        })
    }
}

impl CreateOrderRequest {
    /// Validate the request into a new order, applying the status and date
    /// defaults when none were sent.
    pub(crate) fn into_new_order(self) -> Result<NewOrder, ApiError> {
        let mut errors = ValidationErrors::default();

        let customer_name = self.customer_name.unwrap_or_default();
        let customer_email = self.customer_email.unwrap_or_default();
        let items = self.items.unwrap_or_default();

        let order_date = self.order_date.as_deref().map(parse_date_time);

        errors
            .check(
                customer_name.trim().is_empty(),
                "customerName",
                "Customer name is required",
            )
            .check(
                customer_email.trim().is_empty(),
                "customerEmail",
                "Customer email is required",
            )
            .check(
                !customer_email.contains('@'),
                "customerEmail",
                "Customer email must be a valid email address",
            )
            .check(
                items.is_empty(),
                "items",
                "Order must contain at least one item",
            )
            .check(
                matches!(order_date, Some(None)),
                "orderDate",
                "Order date must be an ISO-8601 date-time",
            );

        let lines: Option<Vec<NewOrderLine>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate(index, &mut errors))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        match lines {
            Some(lines) if errors.is_empty() => {
                let mut order = NewOrder::new(customer_name, customer_email, lines);

                if let Some(status) = self.status.filter(|status| !status.trim().is_empty()) {
                    order = order.with_status(status);
                }

                if let Some(Some(order_date)) = order_date {
                    order = order.with_order_date(order_date);
                }

                Ok(order)
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
