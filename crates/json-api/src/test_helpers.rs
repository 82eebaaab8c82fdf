//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use stockroom_app::{
    context::AppContext,
    domain::{
        orders::{
            MockOrdersService,
            models::{Order, OrderId, OrderLine, OrderLineId},
        },
        products::{
            MockProductsService,
            models::{Product, ProductId},
        },
    },
};

use crate::state::State;

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_search_products().never();
    products.expect_list_products_by_category().never();
    products.expect_list_low_stock_products().never();
    products.expect_create_products_if_empty().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_find_by_status().never();
    orders.expect_find_by_customer_email().never();
    orders.expect_find_by_date_range().never();
    orders.expect_update_status().never();
    orders.expect_delete_order().never();

    orders
}

fn state(products: MockProductsService, orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        orders: Arc::new(orders),
    })
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(products, strict_orders_mock())))
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(strict_products_mock(), orders)))
            .push(route),
    )
}

pub(crate) fn make_product(id: i64, name: &str, price: Decimal, quantity: u32) -> Product {
    Product {
        id: ProductId::from_i64(id),
        name: name.to_string(),
        description: String::new(),
        price,
        quantity,
        category: "Electronics".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An order whose lines each take `quantity` units of `product` at its
/// current price.
pub(crate) fn make_order(id: i64, lines: Vec<(Product, u32)>) -> Order {
    let order_id = OrderId::from_i64(id);

    let lines: Vec<OrderLine> = lines
        .into_iter()
        .zip(0_u32..)
        .map(|((product, quantity), position)| OrderLine {
            id: OrderLineId::from_i64(id * 100 + i64::from(position)),
            order_id,
            position,
            price: product.price,
            product,
            quantity,
        })
        .collect();

    Order {
        id: order_id,
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
        status: "NEW".to_string(),
        total_amount: lines
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum(),
        order_date: Timestamp::UNIX_EPOCH,
        lines,
    }
}
