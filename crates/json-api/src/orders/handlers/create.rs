//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{record_order_created, record_order_rejected},
    orders::{
        errors::into_api_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Reserves stock for every item and records the order in one step. Items
/// are checked in the order given; the first that names an unknown product
/// or asks for more than is left rejects the whole order.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = json.into_inner().into_new_order()?;

    let order = match state.app.orders.create_order(order).await {
        Ok(order) => order,
        Err(error) => {
            record_order_rejected(error.rejection_reason());

            return Err(into_api_error(error));
        }
    };

    record_order_created();

    res.add_header(LOCATION, format!("/api/orders/{}", order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, models::NewOrderLine},
        products::models::ProductId,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{make_order, make_product, orders_service},
    };

    use super::*;

    fn make_service(service: MockOrdersService) -> Service {
        orders_service(service, Router::with_path("api/orders").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "customerName": "Ada Lovelace",
            "customerEmail": "ada@example.com",
            "items": [{ "productId": 1, "quantity": 3 }],
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_201_with_location() -> TestResult {
        let mut service = MockOrdersService::new();

        service
            .expect_create_order()
            .once()
            .withf(|order| {
                order.customer_name == "Ada Lovelace"
                    && order.status == "NEW"
                    && order.lines
                        == vec![NewOrderLine {
                            product_id: ProductId::from_i64(1),
                            quantity: 3,
                        }]
            })
            .return_once(|_| {
                Ok(make_order(
                    12,
                    vec![(make_product(1, "X", Decimal::new(100_00, 2), 7), 3)],
                ))
            });

        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&body())
            .send(&make_service(service))
            .await;

        let order: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/api/orders/12"));
        assert_eq!(order.total_amount, Decimal::new(300_00, 2));
        assert_eq!(order.status, "NEW");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_insufficient_stock_returns_400() -> TestResult {
        let mut service = MockOrdersService::new();

        service.expect_create_order().once().return_once(|_| {
            Err(OrdersServiceError::InsufficientStock {
                product: ProductId::from_i64(1),
                name: "Y".to_string(),
            })
        });

        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&body())
            .send(&make_service(service))
            .await;

        let error: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Not enough stock for product: Y");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_returns_404() -> TestResult {
        let mut service = MockOrdersService::new();

        service
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::ProductNotFound(ProductId::from_i64(999))));

        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&json!({
                "customerName": "Ada Lovelace",
                "customerEmail": "ada@example.com",
                "items": [{ "productId": 999, "quantity": 1 }],
            }))
            .send(&make_service(service))
            .await;

        let error: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(error.message, "Product not found with id: 999");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_without_items_never_reaches_service() -> TestResult {
        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&json!({
                "customerName": "Ada Lovelace",
                "customerEmail": "ada@example.com",
                "items": [],
            }))
            .send(&make_service(MockOrdersService::new()))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["items"], "Order must contain at least one item");

        Ok(())
    }
}
