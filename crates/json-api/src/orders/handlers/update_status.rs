//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Handler
///
/// Sets the status to any value, whatever it was before.
#[endpoint(tags("orders"), summary = "Update Order Status")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    status: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .update_status(id.into_inner().into(), status.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}
