use clap::{Args, Subcommand};
use sqlx::PgPool;
use stockroom_app::database;

mod migrate;
mod seed;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Insert the sample catalogue into an empty database
    Seed(seed::SeedArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::Seed(args) => seed::run(args).await,
    }
}

async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
