//! CLI command implementations.

pub mod export;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the database named by `DATABASE_URL`.
///
/// Loads `.env` first so the CLI shares configuration with the server.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = kirana_server::db::create_pool(&database_url).await?;
    Ok(pool)
}
