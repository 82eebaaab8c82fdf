//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Search Products Handler
///
/// Returns products whose name contains `name`, ignoring case.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    name: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .search_products(name.into_inner())
        .await
        .or_500("failed to search products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
