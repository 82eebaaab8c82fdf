//! Products By Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Products By Category Handler
///
/// Returns products whose category matches exactly.
#[endpoint(tags("products"), summary = "List Products By Category")]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products_by_category(category.into_inner())
        .await
        .or_500("failed to fetch products by category")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
