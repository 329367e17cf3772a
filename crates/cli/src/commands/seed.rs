//! Seed the default catalog.
//!
//! Inserts the stock categories and products a fresh shop starts with, plus
//! the store settings row. Idempotent: existing rows are left untouched, so
//! price edits made through the admin API survive a re-run.

use sqlx::PgPool;
use tracing::info;

use kirana_server::db::SettingsRepository;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("potatoes", "Potatoes", "fas fa-seedling"),
    ("rice", "Rice", "fas fa-wheat-awn"),
    ("onions", "Onions", "fas fa-circle"),
    ("flour-atta", "Flour/Atta", "fas fa-mortar-pestle"),
];

const PRODUCTS: &[(&str, &str, &str, i64)] = &[
    ("gulla", "potatoes", "Gulla", 520),
    ("pokhraj", "potatoes", "Pokhraj", 600),
    ("swastik-miniket", "rice", "Swastik Miniket", 1599),
    ("basmati-rice", "rice", "Premium Basmati", 1850),
    ("red-onions", "onions", "Red Onions", 850),
    ("white-onions", "onions", "White Onions", 780),
    ("wheat-atta", "flour-atta", "Whole Wheat Atta", 1200),
    ("maida", "flour-atta", "All Purpose Flour (Maida)", 950),
];

/// Seed the default catalog and store settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to database");

    let categories = seed_categories(&pool).await?;
    let products = seed_products(&pool).await?;

    // Creates the settings row if missing (store open, no admin session).
    SettingsRepository::new(&pool).get().await?;

    info!(categories, products, "Seeding complete");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for (id, name, icon) in CATEGORIES {
        let result = sqlx::query(
            "INSERT INTO category (id, name, icon) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(icon)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn seed_products(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for (id, category_id, name, price) in PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO product (id, category_id, name, price) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(category_id)
        .bind(name)
        .bind(price)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}
