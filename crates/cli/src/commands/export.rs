//! CSV export commands.
//!
//! Reuses the server's export formatting so the CLI and the HTTP endpoints
//! always produce identical files.

use tracing::info;

use kirana_server::db::{CustomerRepository, OrderRepository};
use kirana_server::export;

/// Export all customers as CSV to a file or stdout.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the file write fails.
pub async fn customers(out: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let customers = CustomerRepository::new(&pool).list().await?;
    let csv = export::customers_csv(&customers)?;

    write_output(out, &csv).await?;
    info!(count = customers.len(), "Customers exported");
    Ok(())
}

/// Export all orders as CSV to a file or stdout.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the file write fails.
pub async fn orders(out: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let orders = OrderRepository::new(&pool).list().await?;
    let csv = export::orders_csv(&orders)?;

    write_output(out, &csv).await?;
    info!(count = orders.len(), "Orders exported");
    Ok(())
}

async fn write_output(out: Option<&str>, csv: &str) -> Result<(), std::io::Error> {
    match out {
        Some(path) => tokio::fs::write(path, csv).await,
        None => {
            #[allow(clippy::print_stdout)]
            {
                print!("{csv}");
            }
            Ok(())
        }
    }
}
