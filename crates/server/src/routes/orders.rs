//! Order route handlers.
//!
//! Order submission runs the full pipeline: the store-open gate, customer
//! resolution, catalog lookup, the pure [`build_order`] pricing step, then
//! the insert. Item snapshots are priced from the catalog at submission
//! time, so later product edits never change a stored order.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use kirana_core::{CustomerId, Order, OrderId, OrderStatus, ProductId, build_order};

use super::not_found_as;
use crate::db::{CatalogRepository, CustomerRepository, OrderRepository, SettingsRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Order submission payload. `items` maps product id to quantity.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub items: HashMap<ProductId, u32>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SetPayment {
    pub is_paid: bool,
}

/// Build and persist an order.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrder>,
) -> Result<Json<Order>> {
    if !SettingsRepository::new(state.pool()).is_store_open().await? {
        return Err(AppError::StoreClosed);
    }

    let customer = CustomerRepository::new(state.pool())
        .get(&payload.customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("customer not found".to_owned()))?;

    let catalog = CatalogRepository::new(state.pool()).list_products().await?;
    let draft = build_order(&customer, &catalog, &payload.items)?;

    let order = OrderRepository::new(state.pool()).insert(&draft).await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %order.customer_id,
        grand_total = order.grand_total,
        "order placed"
    );
    Ok(Json(order))
}

/// List all orders, newest first (admin view).
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Set an order's delivery status. Any transition is allowed, including
/// moving back from `delivered`; re-applying the current status succeeds.
#[instrument(skip(state, payload))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<SetStatus>,
) -> Result<Json<serde_json::Value>> {
    let status: OrderStatus = payload.status.parse()?;

    OrderRepository::new(state.pool())
        .set_status(&id, status)
        .await
        .map_err(|e| not_found_as(e, "order not found"))?;

    tracing::info!(order_id = %id, status = %status, "order status updated");
    Ok(Json(json!({ "success": true })))
}

/// Set an order's payment flag.
#[instrument(skip(state, payload))]
pub async fn set_payment(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<SetPayment>,
) -> Result<Json<serde_json::Value>> {
    OrderRepository::new(state.pool())
        .set_paid(&id, payload.is_paid)
        .await
        .map_err(|e| not_found_as(e, "order not found"))?;

    tracing::info!(order_id = %id, is_paid = payload.is_paid, "order payment updated");
    Ok(Json(json!({ "success": true })))
}
