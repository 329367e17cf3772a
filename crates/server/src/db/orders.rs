//! Order repository for database operations.
//!
//! Orders embed their line items as a JSONB snapshot. That snapshot is
//! written once at insert time and never patched afterwards, which is what
//! makes historical orders immune to catalog edits.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use kirana_core::{CustomerId, Order, OrderDraft, OrderId, OrderItem, OrderStatus, PhoneNumber};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    customer_name: String,
    customer_phone: String,
    items: Json<Vec<OrderItem>>,
    total_items: i64,
    grand_total: i64,
    status: String,
    is_paid: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&row.status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        let customer_phone = PhoneNumber::parse(&row.customer_phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone number in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            customer_name: row.customer_name,
            customer_phone,
            items: row.items.0,
            total_items: row.total_items,
            grand_total: row.grand_total,
            status,
            is_paid: row.is_paid,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, customer_id, customer_name, customer_phone, items, \
                              total_items, grand_total, status, is_paid, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order draft, assigning its id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the returned row is invalid.
    pub async fn insert(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let id = OrderId::generate();
        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO purchase_order
                 (id, customer_id, customer_name, customer_phone, items,
                  total_items, grand_total, status, is_paid)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id, customer_id, customer_name, customer_phone, items,
                       total_items, grand_total, status, is_paid, created_at",
        )
        .bind(id.as_str())
        .bind(draft.customer_id.as_str())
        .bind(&draft.customer_name)
        .bind(draft.customer_phone.as_str())
        .bind(Json(&draft.items))
        .bind(draft.total_items)
        .bind(draft.grand_total)
        .bind(draft.status.as_str())
        .bind(draft.is_paid)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM purchase_order WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM purchase_order ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Set an order's delivery status.
    ///
    /// Idempotent: setting the current status again succeeds and changes
    /// nothing. Any status may be set from any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE purchase_order SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(status.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Set an order's payment flag.
    ///
    /// Idempotent and independent of delivery status; the flag may toggle
    /// back and forth freely.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_paid(&self, id: &OrderId, is_paid: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE purchase_order SET is_paid = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(is_paid)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
