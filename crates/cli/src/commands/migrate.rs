//! Database migration command.
//!
//! Migrations are embedded in the server crate and applied here, never on
//! server startup.

use tracing::info;

/// Run pending database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to database");

    info!("Running migrations...");
    kirana_server::db::MIGRATOR.run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
