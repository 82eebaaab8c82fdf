use clap::Args;
use stockroom_app::{
    database::Db,
    domain::products::{PgProductsService, seed::seed_sample_products},
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = super::connect(&args.database_url).await?;

    let products = PgProductsService::new(Db::new(pool));

    let inserted = seed_sample_products(&products)
        .await
        .map_err(|error| format!("failed to seed sample data: {error}"))?;

    if inserted == 0 {
        println!("products already present; nothing seeded");
    } else {
        println!("seeded {inserted} sample products");
    }

    Ok(())
}
