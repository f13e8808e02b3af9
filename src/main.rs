use anyhow::Context;

use autodealer_db::config::Config;
use autodealer_db::db;

/// Applies the schema migrations to the configured database. The schema is
/// the system's external interface; consuming applications speak SQL against
/// it through the repository layer.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let pool = db::connect(&config)
        .await
        .context("failed to connect to the database")?;

    db::run_migrations(&pool)
        .await
        .context("failed to apply database migrations")?;

    tracing::info!("AutoDealer schema is up to date");
    Ok(())
}
