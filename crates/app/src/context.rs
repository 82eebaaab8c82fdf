//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService, ProductsServiceError, seed},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("failed to seed sample data")]
    Seed(#[source] ProductsServiceError),
}

/// Startup options applied while building the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub run_migrations: bool,
    pub seed_sample_data: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection, applying
    /// migrations or seeding sample data fails.
    pub async fn from_database_url(url: &str, options: AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migration)?;
        }

        let db = Db::new(pool);

        let context = Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        };

        if options.seed_sample_data {
            seed::seed_sample_products(context.products.as_ref())
                .await
                .map_err(AppInitError::Seed)?;
        }

        Ok(context)
    }
}
