//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// Update Product Handler
///
/// Replaces every field of a product.
#[endpoint(tags("products"), summary = "Update Product")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let product = state
        .app
        .products
        .update_product(id.into_inner().into(), update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(product.into()))
}
