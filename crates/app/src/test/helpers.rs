//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::{
    orders::models::{NewOrder, NewOrderLine},
    products::models::{NewProduct, ProductId},
};

pub(crate) fn new_product(name: &str, price: Decimal, quantity: u32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        quantity,
        category: "General".to_string(),
    }
}

pub(crate) fn order_line(product: ProductId, quantity: u32) -> NewOrderLine {
    NewOrderLine {
        product_id: product,
        quantity,
    }
}

pub(crate) fn new_order(lines: Vec<NewOrderLine>) -> NewOrder {
    NewOrder::new("Ada Lovelace", "ada@example.com", lines)
}
