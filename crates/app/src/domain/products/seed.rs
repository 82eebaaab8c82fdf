//! Sample catalogue used to populate an empty database.

use rust_decimal::Decimal;

use crate::domain::products::{ProductsService, ProductsServiceError, models::NewProduct};

fn sample_product(
    name: &str,
    description: &str,
    price: Decimal,
    quantity: u32,
    category: &str,
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
        category: category.to_string(),
    }
}

/// The sample catalogue, in insertion order.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        sample_product(
            "Laptop",
            "High-performance laptop with 16GB RAM and 512GB SSD",
            Decimal::new(1299_99, 2),
            10,
            "Electronics",
        ),
        sample_product(
            "Smartphone",
            "Latest model with 128GB storage and 5G capability",
            Decimal::new(899_99, 2),
            15,
            "Electronics",
        ),
        sample_product(
            "Headphones",
            "Noise-cancelling wireless headphones with 30-hour battery life",
            Decimal::new(249_99, 2),
            20,
            "Accessories",
        ),
        sample_product(
            "Monitor",
            "27-inch 4K monitor",
            Decimal::new(350_00, 2),
            8,
            "Electronics",
        ),
        sample_product(
            "Keyboard",
            "Mechanical gaming keyboard",
            Decimal::new(120_00, 2),
            25,
            "Accessories",
        ),
    ]
}

/// Insert the sample catalogue when no products exist yet.
///
/// The emptiness check and every insert share one transaction, so a failed
/// insert leaves the catalogue empty. Returns the number of products
/// inserted, which is zero when the catalogue already has data.
///
/// # Errors
///
/// Returns the error that rolled the seed back.
pub async fn seed_sample_products(
    products: &dyn ProductsService,
) -> Result<usize, ProductsServiceError> {
    let created = products.create_products_if_empty(sample_products()).await?;

    if created.is_empty() {
        tracing::info!("products already present, skipping sample data");
    } else {
        tracing::info!(count = created.len(), "seeded sample products");
    }

    Ok(created.len())
}
