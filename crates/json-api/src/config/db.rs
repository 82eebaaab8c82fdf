//! Database Config

use clap::{ArgAction, Args};
use stockroom_app::context::AppOptions;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Apply pending migrations before serving requests.
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = true, action = ArgAction::Set)]
    pub run_migrations: bool,

    /// Insert the sample catalogue when no products exist.
    #[arg(long, env = "SEED_SAMPLE_DATA", default_value_t = false, action = ArgAction::Set)]
    pub seed_sample_data: bool,
}

impl DatabaseConfig {
    /// Startup options for the application context.
    #[must_use]
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            run_migrations: self.run_migrations,
            seed_sample_data: self.seed_sample_data,
        }
    }
}
