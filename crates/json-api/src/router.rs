//! App Router

use salvo::Router;

use crate::{orders, products};

/// Routes under `/api`. Literal segments are registered ahead of `{id}`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("low-stock").get(products::low_stock::handler))
                .push(Router::with_path("category/{category}").get(products::category::handler))
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("date-range").get(orders::date_range::handler))
                .push(Router::with_path("status/{status}").get(orders::by_status::handler))
                .push(Router::with_path("customer/{email}").get(orders::by_customer::handler))
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").put(orders::update_status::handler)),
                ),
        )
}
