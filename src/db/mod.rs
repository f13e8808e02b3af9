use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::common::AppError;
use crate::config::Config;

pub mod brand_repo;
pub mod car_model_repo;
pub mod car_repo;
pub mod customer_repo;
pub mod part_repo;
pub mod purchase_repo;
pub mod service_campaign_repo;
pub mod warehouse_repo;
pub mod work_repo;

pub use brand_repo::BrandRepository;
pub use car_model_repo::CarModelRepository;
pub use car_repo::CarRepository;
pub use customer_repo::CustomerRepository;
pub use part_repo::PartRepository;
pub use purchase_repo::PurchaseRequestRepository;
pub use service_campaign_repo::ServiceCampaignRepository;
pub use warehouse_repo::WarehouseRepository;
pub use work_repo::WorkRepository;

/// Builds the connection pool described by `config`.
pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    tracing::info!("database connection established");
    Ok(pool)
}

/// Applies the embedded migrations in order (0001 → 0004 → 0005 → 0006).
/// The schema is the system's external interface; this is the one piece of
/// executable behavior the crate ships.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
