//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns an order with its lines.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}
