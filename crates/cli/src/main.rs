//! Kirana CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! kirana migrate
//!
//! # Seed the default catalog
//! kirana seed
//!
//! # Export customers as CSV to stdout
//! kirana export customers
//!
//! # Export orders as CSV to a file
//! kirana export orders --out orders.csv
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the default catalog (idempotent)
//! - `export` - Export customers or orders as CSV

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kirana")]
#[command(author, version, about = "Kirana CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the default catalog and store settings
    Seed,
    /// Export data as CSV
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Export all customers
    Customers {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Export all orders
    Orders {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Export { target } => match target {
            ExportTarget::Customers { out } => {
                commands::export::customers(out.as_deref()).await?;
            }
            ExportTarget::Orders { out } => {
                commands::export::orders(out.as_deref()).await?;
            }
        },
    }
    Ok(())
}
