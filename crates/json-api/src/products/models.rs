//! Product request and response bodies.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::models::{NewProduct, Product, ProductUpdate};

use crate::errors::{ApiError, ValidationErrors};

/// Prices are stored with ten integer digits.
const PRICE_LIMIT: Decimal = Decimal::from_parts(0x540B_E400, 2, 0, false, 0); // 10_000_000_000

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// Product identifier
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Units on hand
    pub quantity: u32,

    pub category: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last changed
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_i64(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Request
///
/// Used for both creating and replacing a product. Every field is optional
/// on the wire so that missing values are reported per field.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProductRequest {
    /// Product name, required
    pub name: Option<String>,

    pub description: Option<String>,

    /// Unit price, zero or greater
    #[serde(with = "rust_decimal::serde::float_option")]
    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,

    /// Units on hand, zero or greater
    pub quantity: Option<i64>,

    pub category: Option<String>,
}

impl ProductRequest {
    /// Validate the request into a new product.
    pub(crate) fn into_new_product(self) -> Result<NewProduct, ApiError> {
        let name = self.name.unwrap_or_default();
        let price = self.price.map(|price| price.round_dp(2));
        let quantity = self
            .quantity
            .and_then(|quantity| i32::try_from(quantity).ok())
            .and_then(|quantity| u32::try_from(quantity).ok());

        let mut errors = ValidationErrors::default();

        errors
            .check(name.trim().is_empty(), "name", "Product name is required")
            .check(price.is_none(), "price", "Price is required")
            .check(
                price.is_some_and(|price| price < Decimal::ZERO),
                "price",
                "Price must be zero or greater",
            )
            .check(
                price.is_some_and(|price| price >= PRICE_LIMIT),
                "price",
                "Price must be less than 10000000000",
            )
            .check(self.quantity.is_none(), "quantity", "Quantity is required")
            .check(
                self.quantity.is_some_and(|quantity| quantity < 0),
                "quantity",
                "Quantity must be zero or greater",
            )
            .check(
                self.quantity.is_some() && quantity.is_none(),
                "quantity",
                "Quantity is too large",
            );

        match (price, quantity) {
            (Some(price), Some(quantity)) if errors.is_empty() => Ok(NewProduct {
                name,
                description: self.description.unwrap_or_default(),
                price,
                quantity,
                category: self.category.unwrap_or_default(),
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }

    /// Validate the request into a full replacement of a product.
    pub(crate) fn into_update(self) -> Result<ProductUpdate, ApiError> {
        let NewProduct {
            name,
            description,
            price,
            quantity,
            category,
        } = self.into_new_product()?;

        Ok(ProductUpdate {
            name,
            description,
            price,
            quantity,
            category,
        })
    }
}
