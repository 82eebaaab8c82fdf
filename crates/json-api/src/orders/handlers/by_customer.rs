//! Orders By Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, orders::models::OrderResponse, state::State};

/// Orders By Customer Handler
///
/// Returns orders placed with exactly this email address.
#[endpoint(tags("orders"), summary = "List Orders By Customer Email")]
pub(crate) async fn handler(
    email: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .find_by_customer_email(email.into_inner())
        .await
        .or_500("failed to fetch orders by customer")?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
