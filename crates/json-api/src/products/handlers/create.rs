//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = json.into_inner().into_new_product()?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
