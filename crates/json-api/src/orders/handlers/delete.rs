//! Delete Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, orders::errors::into_api_error, state::State};

/// Delete Order Handler
///
/// Removes the order and its lines. Stock is not returned to products.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order deleted"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .orders
        .delete_order(id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
