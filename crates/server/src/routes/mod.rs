//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (database ping)
//!
//! # Catalog
//! GET    /api/categories              - Categories with nested products
//! POST   /api/categories              - Add category (admin)
//! PUT    /api/categories/{id}         - Update category (admin)
//! DELETE /api/categories/{id}         - Delete category + products (admin)
//! POST   /api/products                - Add product (admin)
//! PUT    /api/products/{id}           - Update product (admin)
//! DELETE /api/products/{id}           - Delete product (admin)
//!
//! # Customers
//! POST   /api/customers/register      - Register and become current customer
//! POST   /api/customers/login         - Login by phone number
//! GET    /api/customers               - List customers (admin)
//! GET    /api/customers/current       - Single-session current customer
//!
//! # Orders
//! POST   /api/orders                  - Build and persist an order
//! GET    /api/orders                  - List orders (admin)
//! PUT    /api/orders/{id}/status      - Set delivery status
//! PUT    /api/orders/{id}/payment     - Set payment flag
//!
//! # Store / Admin
//! GET    /api/store/status            - Store-open gate
//! POST   /api/store/toggle            - Flip the gate (admin)
//! POST   /api/admin/login             - Check admin password
//! POST   /api/admin/logout            - Clear admin flag
//! GET    /api/admin/status            - Admin flag
//!
//! # Export
//! GET    /api/export/customers.csv    - Customers CSV (admin)
//! GET    /api/export/orders.csv       - Orders CSV (admin)
//! ```

pub mod catalog;
pub mod customers;
pub mod export;
pub mod orders;
pub mod store;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::state::AppState;

/// Rewrite a repository `NotFound` with the entity that was being addressed.
pub(crate) fn not_found_as(err: RepositoryError, what: impl Into<String>) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound(what.into()),
        other => other.into(),
    }
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            put(catalog::update_category).delete(catalog::delete_category),
        )
        .route("/products", post(catalog::create_product))
        .route(
            "/products/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list))
        .route("/customers/register", post(customers::register))
        .route("/customers/login", post(customers::login))
        .route("/customers/current", get(customers::current))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/{id}/status", put(orders::set_status))
        .route("/orders/{id}/payment", put(orders::set_payment))
}

/// Create the store/admin routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/store/status", get(store::status))
        .route("/store/toggle", post(store::toggle))
        .route("/admin/login", post(store::admin_login))
        .route("/admin/logout", post(store::admin_logout))
        .route("/admin/status", get(store::admin_status))
}

/// Create the export routes router.
pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/export/customers.csv", get(export::customers))
        .route("/export/orders.csv", get(export::orders))
}

/// Create all API routes, to be nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(customer_routes())
        .merge(order_routes())
        .merge(store_routes())
        .merge(export_routes())
}
