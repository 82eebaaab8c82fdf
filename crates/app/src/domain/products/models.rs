//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: String,
}

/// Product Update Model
///
/// Every mutable field is overwritten; there is no partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: String,
}
