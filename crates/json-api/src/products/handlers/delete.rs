//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error, state::State};

/// Delete Product Handler
///
/// Products still named by an order line cannot be deleted.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .products
        .delete_product(id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
