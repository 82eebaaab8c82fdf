//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Product Index Handler
///
/// Returns every product, ordered by id.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stockroom_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(service: MockProductsService) -> Service {
        products_service(service, Router::with_path("api/products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/api/products")
            .send(&make_service(service))
            .await;

        let products: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_service_order() -> TestResult {
        let mut service = MockProductsService::new();

        service.expect_list_products().once().return_once(|| {
            Ok(vec![
                make_product(1, "Laptop", Decimal::new(1299_99, 2), 10),
                make_product(2, "Mouse", Decimal::new(19_99, 2), 50),
            ])
        });

        let products: Vec<ProductResponse> = TestClient::get("http://example.com/api/products")
            .send(&make_service(service))
            .await
            .take_json()
            .await?;

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Laptop", "Mouse"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_serializes_camel_case_fields() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![make_product(1, "Laptop", Decimal::new(1299_99, 2), 10)]));

        let body: serde_json::Value = TestClient::get("http://example.com/api/products")
            .send(&make_service(service))
            .await
            .take_json()
            .await?;

        let product = body.get(0).ok_or("expected one product")?;

        assert_eq!(product.get("id"), Some(&serde_json::json!(1)));
        assert_eq!(product.get("price"), Some(&serde_json::json!(1299.99)));
        assert_eq!(
            product.get("createdAt"),
            Some(&serde_json::json!("1970-01-01T00:00:00Z"))
        );
        assert!(product.get("created_at").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/api/products")
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
