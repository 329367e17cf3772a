//! Store gate and admin session handlers.
//!
//! Admin "session" state is a single boolean in `store_settings`, matching
//! the one-device deployment model. The password check itself happens on
//! every login call against the configured secret.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminLogin {
    pub password: String,
}

/// Whether the store is currently accepting orders.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Json<Value>> {
    let is_open = SettingsRepository::new(state.pool()).is_store_open().await?;
    Ok(Json(json!({ "is_store_open": is_open })))
}

/// Flip the store-open gate and return the new value.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Result<Json<Value>> {
    let is_open = SettingsRepository::new(state.pool()).toggle_store().await?;
    tracing::info!(is_store_open = is_open, "store gate toggled");
    Ok(Json(json!({ "is_store_open": is_open })))
}

/// Check the admin password and set the logged-in flag.
#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLogin>,
) -> Result<Json<Value>> {
    if !state.verify_admin_password(&payload.password) {
        tracing::warn!("admin login rejected");
        return Err(AppError::Unauthorized("invalid admin password".to_owned()));
    }

    SettingsRepository::new(state.pool())
        .set_admin_logged_in(true)
        .await?;
    tracing::info!("admin logged in");
    Ok(Json(json!({ "success": true })))
}

/// Clear the admin logged-in flag.
#[instrument(skip(state))]
pub async fn admin_logout(State(state): State<AppState>) -> Result<Json<Value>> {
    SettingsRepository::new(state.pool())
        .set_admin_logged_in(false)
        .await?;
    tracing::info!("admin logged out");
    Ok(Json(json!({ "success": true })))
}

/// Whether an admin is currently logged in.
#[instrument(skip(state))]
pub async fn admin_status(State(state): State<AppState>) -> Result<Json<Value>> {
    let logged_in = SettingsRepository::new(state.pool())
        .is_admin_logged_in()
        .await?;
    Ok(Json(json!({ "is_admin_logged_in": logged_in })))
}
