//! Orders By Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, orders::models::OrderResponse, state::State};

/// Orders By Status Handler
#[endpoint(tags("orders"), summary = "List Orders By Status")]
pub(crate) async fn handler(
    status: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .find_by_status(status.into_inner())
        .await
        .or_500("failed to fetch orders by status")?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
