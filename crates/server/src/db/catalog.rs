//! Catalog repository for database operations.
//!
//! Categories and products are stored with a `position` sequence so the
//! admin's insertion order is preserved in every listing.

use sqlx::PgPool;
use uuid::Uuid;

use kirana_core::{Category, CategoryId, Product, ProductId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    icon: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            icon: row.icon,
            products: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    category_id: String,
    name: String,
    price: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            price: row.price,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with their products nested, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let category_rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, icon FROM category ORDER BY position",
        )
        .fetch_all(self.pool)
        .await?;

        let product_rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, category_id, name, price FROM product ORDER BY position",
        )
        .fetch_all(self.pool)
        .await?;

        let mut categories: Vec<Category> =
            category_rows.into_iter().map(Category::from).collect();
        for row in product_rows {
            let product = Product::from(row);
            if let Some(category) = categories.iter_mut().find(|c| c.id == product.category_id) {
                category.products.push(product);
            }
        }

        Ok(categories)
    }

    /// Get a single category with its products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_category(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, icon FROM category WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut category = Category::from(row);
        let product_rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, category_id, name, price FROM product
             WHERE category_id = $1 ORDER BY position",
        )
        .bind(id.as_str())
        .fetch_all(self.pool)
        .await?;
        category.products = product_rows.into_iter().map(Product::from).collect();

        Ok(Some(category))
    }

    /// Create a new category with a slug id derived from its name.
    ///
    /// If the slug is already taken, a short random suffix is appended.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if both the slug and the
    /// suffixed slug collide.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_category(
        &self,
        name: &str,
        icon: &str,
    ) -> Result<Category, RepositoryError> {
        let slug = slugify(name);
        match self.insert_category(&slug, name, icon).await {
            Err(RepositoryError::Conflict(_)) => {
                let suffixed = format!("{slug}-{}", short_suffix());
                self.insert_category(&suffixed, name, icon).await
            }
            other => other,
        }
    }

    async fn insert_category(
        &self,
        id: &str,
        name: &str,
        icon: &str,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO category (id, name, icon) VALUES ($1, $2, $3)
             RETURNING id, name, icon",
        )
        .bind(id)
        .bind(name)
        .bind(icon)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique("category id already exists"))?;

        Ok(Category::from(row))
    }

    /// Update a category's name and/or icon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        name: Option<&str>,
        icon: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE category
             SET name = COALESCE($2, name), icon = COALESCE($3, icon)
             WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(name)
        .bind(icon)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a category. Its products go with it (`ON DELETE CASCADE`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List every product in the catalog, in category then insertion order.
    ///
    /// Used as the catalog snapshot when building an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT p.id, p.category_id, p.name, p.price
             FROM product p
             JOIN category c ON c.id = p.category_id
             ORDER BY c.position, p.position",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Create a new product under a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the derived id is taken twice.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_product(
        &self,
        category_id: &CategoryId,
        name: &str,
        price: i64,
    ) -> Result<Product, RepositoryError> {
        let slug = slugify(name);
        match self.insert_product(&slug, category_id, name, price).await {
            Err(RepositoryError::Conflict(_)) => {
                let suffixed = format!("{slug}-{}", short_suffix());
                self.insert_product(&suffixed, category_id, name, price).await
            }
            other => other,
        }
    }

    async fn insert_product(
        &self,
        id: &str,
        category_id: &CategoryId,
        name: &str,
        price: i64,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO product (id, category_id, name, price)
             VALUES ($1, $2, $3, $4)
             RETURNING id, category_id, name, price",
        )
        .bind(id)
        .bind(category_id.as_str())
        .bind(name)
        .bind(price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    // Referential integrity: the product's category must exist.
                    return RepositoryError::NotFound;
                }
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict("product id already exists".to_owned());
                }
            }
            RepositoryError::Database(e)
        })?;

        Ok(Product::from(row))
    }

    /// Update a product's name and/or price.
    ///
    /// Stored orders are unaffected: they carry their own snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_product(
        &self,
        id: &ProductId,
        name: Option<&str>,
        price: Option<i64>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE product
             SET name = COALESCE($2, name), price = COALESCE($3, price)
             WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(name)
        .bind(price)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Map a unique violation to `Conflict`, everything else to `Database`.
fn conflict_on_unique(message: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}

/// Derive a url-safe slug id from a display name.
///
/// `"Flour/Atta"` becomes `"flour-atta"`, matching the hand-written ids the
/// seed catalog uses.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        short_suffix()
    } else {
        slug
    }
}

/// Short random suffix for slug collisions.
fn short_suffix() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id.chars().take(8).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Red Onions"), "red-onions");
        assert_eq!(slugify("Flour/Atta"), "flour-atta");
        assert_eq!(slugify("All Purpose Flour (Maida)"), "all-purpose-flour-maida");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Rice --  Basmati  "), "rice-basmati");
    }

    #[test]
    fn test_slugify_empty_falls_back_to_random() {
        let slug = slugify("!!!");
        assert_eq!(slug.len(), 8);
        assert!(slug.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_short_suffix_is_short_and_unique() {
        let a = short_suffix();
        let b = short_suffix();
        assert_eq!(a.len(), 8);
        assert_ne!(a, b);
    }
}
