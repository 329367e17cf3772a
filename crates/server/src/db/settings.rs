//! Store settings database operations.
//!
//! A single `store_settings` row holds the store-open gate, the
//! single-session current-customer pointer, and the admin login flag. The
//! row is created on first read.
//!
//! The current-customer pointer serves the original single-kiosk flow only;
//! it is process-global state and not safe for concurrent multi-customer
//! use. Order submission does not rely on it - the order endpoint takes an
//! explicit customer id.

use sqlx::PgPool;

use kirana_core::CustomerId;

use super::RepositoryError;

/// The singleton settings row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreSettings {
    pub is_store_open: bool,
    pub current_customer_id: Option<String>,
    pub is_admin_logged_in: bool,
}

const SETTINGS_ID: &str = "store_settings";

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, creating it with defaults on first read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self) -> Result<StoreSettings, RepositoryError> {
        let settings = sqlx::query_as::<_, StoreSettings>(
            "INSERT INTO store_settings (id) VALUES ($1)
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
             RETURNING is_store_open, current_customer_id, is_admin_logged_in",
        )
        .bind(SETTINGS_ID)
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Whether the store is currently accepting orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn is_store_open(&self) -> Result<bool, RepositoryError> {
        Ok(self.get().await?.is_store_open)
    }

    /// Flip the store-open gate and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn toggle_store(&self) -> Result<bool, RepositoryError> {
        // Ensure the row exists before toggling.
        self.get().await?;

        let is_open = sqlx::query_scalar::<_, bool>(
            "UPDATE store_settings SET is_store_open = NOT is_store_open
             WHERE id = $1
             RETURNING is_store_open",
        )
        .bind(SETTINGS_ID)
        .fetch_one(self.pool)
        .await?;

        Ok(is_open)
    }

    /// Point the single-session flow at a customer (or clear it).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn set_current_customer(
        &self,
        customer_id: Option<&CustomerId>,
    ) -> Result<(), RepositoryError> {
        self.get().await?;

        sqlx::query("UPDATE store_settings SET current_customer_id = $2 WHERE id = $1")
            .bind(SETTINGS_ID)
            .bind(customer_id.map(CustomerId::as_str))
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// The current-customer pointer, if set.
    ///
    /// A dangling pointer (the customer row was deleted) reads as `None`;
    /// the foreign key is `ON DELETE SET NULL`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn current_customer_id(&self) -> Result<Option<CustomerId>, RepositoryError> {
        let settings = self.get().await?;
        Ok(settings.current_customer_id.map(CustomerId::new))
    }

    /// Set the admin login flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn set_admin_logged_in(&self, logged_in: bool) -> Result<(), RepositoryError> {
        self.get().await?;

        sqlx::query("UPDATE store_settings SET is_admin_logged_in = $2 WHERE id = $1")
            .bind(SETTINGS_ID)
            .bind(logged_in)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Whether the admin flag is set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn is_admin_logged_in(&self) -> Result<bool, RepositoryError> {
        Ok(self.get().await?.is_admin_logged_in)
    }
}
