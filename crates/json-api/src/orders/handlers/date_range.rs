//! Orders By Date Range Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::{ApiError, ValidationErrors},
    extensions::*,
    orders::models::OrderResponse,
    state::State,
};

/// Orders By Date Range Handler
///
/// Returns orders placed between `startDate` and `endDate`, both inclusive.
/// Either bound may omit its offset, in which case it is read as UTC.
#[endpoint(tags("orders"), summary = "List Orders By Date Range")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let start = req.query::<String>("startDate");
    let end = req.query::<String>("endDate");

    let start = start.as_deref().and_then(parse_date_time);
    let end = end.as_deref().and_then(parse_date_time);

    let mut errors = ValidationErrors::default();

    errors
        .check(
            start.is_none(),
            "startDate",
            "Start date must be an ISO-8601 date-time",
        )
        .check(
            end.is_none(),
            "endDate",
            "End date must be an ISO-8601 date-time",
        );

    let (Some(start), Some(end)) = (start, end) else {
        return Err(ApiError::Validation(errors));
    };

    let orders = state
        .app
        .orders
        .find_by_date_range(start, end)
        .await
        .or_500("failed to fetch orders by date range")?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
