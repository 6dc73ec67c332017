use seatlock_types::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub use sqlx::PgPool as Pool;

/// Builds the bounded Postgres connection pool used by the whole service.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.store_deadline)
        .connect(&config.database_url)
        .await
}
