//! Low Stock Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Threshold used when the caller does not give one.
const DEFAULT_THRESHOLD: u32 = 5;

/// Low Stock Products Handler
///
/// Returns products with fewer than `threshold` units on hand.
#[endpoint(tags("products"), summary = "List Low Stock Products")]
pub(crate) async fn handler(
    threshold: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let threshold = threshold.into_inner().unwrap_or(DEFAULT_THRESHOLD);

    let products = state
        .app
        .products
        .list_low_stock_products(threshold)
        .await
        .or_500("failed to fetch low stock products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stockroom_app::domain::products::MockProductsService;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(service: MockProductsService) -> Service {
        products_service(service, Router::with_path("api/products/low-stock").get(handler))
    }

    #[tokio::test]
    async fn test_low_stock_defaults_threshold_to_five() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_list_low_stock_products()
            .once()
            .withf(|threshold| *threshold == 5)
            .return_once(|_| Ok(vec![make_product(2, "Cable", Decimal::ONE, 4)]));

        let mut res = TestClient::get("http://example.com/api/products/low-stock")
            .send(&make_service(service))
            .await;

        let products: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(products.len(), 1, "expected one low stock product");

        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_forwards_threshold() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_list_low_stock_products()
            .once()
            .withf(|threshold| *threshold == 20)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/products/low-stock?threshold=20")
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_negative_threshold_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/api/products/low-stock?threshold=-1")
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
