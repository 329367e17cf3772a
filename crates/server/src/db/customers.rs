//! Customer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kirana_core::{Customer, CustomerId, NewCustomer, PhoneNumber};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    full_name: String,
    phone_number: String,
    shop_name: Option<String>,
    delivery_location: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let phone_number = PhoneNumber::parse(&row.phone_number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone number in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            full_name: row.full_name,
            phone_number,
            shop_name: row.shop_name,
            delivery_location: row.delivery_location,
            registered_at: row.registered_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, full_name, phone_number, shop_name, delivery_location, registered_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a new customer.
    ///
    /// The payload must already be validated; pass the parsed phone number
    /// from [`NewCustomer::validate`]. No duplicate-phone check is made:
    /// the schema allows shared numbers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the returned row is invalid.
    pub async fn register(
        &self,
        payload: &NewCustomer,
        phone: &PhoneNumber,
    ) -> Result<Customer, RepositoryError> {
        let id = CustomerId::generate();
        let row = sqlx::query_as::<_, CustomerRow>(
            "INSERT INTO customer (id, full_name, phone_number, shop_name, delivery_location)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, full_name, phone_number, shop_name, delivery_location, registered_at",
        )
        .bind(id.as_str())
        .bind(payload.full_name.trim())
        .bind(phone.as_str())
        .bind(payload.normalized_shop_name())
        .bind(payload.delivery_location.trim())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up a customer by phone number (login).
    ///
    /// Phone numbers are not unique; "first match" is pinned to the
    /// earliest registration so duplicate numbers resolve deterministically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customer
             WHERE phone_number = $1
             ORDER BY registered_at ASC, id ASC
             LIMIT 1"
        ))
        .bind(phone.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all customers, newest registration first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customer ORDER BY registered_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
