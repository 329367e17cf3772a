//! Customer route handlers.
//!
//! Registration and login also update the single-session current-customer
//! pointer, preserving the original kiosk-style flow. That pointer is a
//! convenience for a one-device deployment and is NOT multi-session safe;
//! order submission takes an explicit customer id instead of reading it.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use kirana_core::{Customer, NewCustomer, PhoneNumber};

use crate::db::{CustomerRepository, SettingsRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
}

/// Register a new customer and make them the current customer.
///
/// Duplicate phone numbers are allowed; see [`CustomerRepository::register`].
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> Result<Json<Customer>> {
    let phone = payload.validate()?;

    let customer = CustomerRepository::new(state.pool())
        .register(&payload, &phone)
        .await?;
    SettingsRepository::new(state.pool())
        .set_current_customer(Some(&customer.id))
        .await?;

    tracing::info!(customer_id = %customer.id, "customer registered");
    Ok(Json(customer))
}

/// Log a customer in by phone number.
///
/// With duplicate numbers, resolves to the earliest registration.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Customer>> {
    let phone = PhoneNumber::parse(&payload.phone_number)?;

    let customer = CustomerRepository::new(state.pool())
        .find_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::NotFound("no customer with that phone number".to_owned()))?;

    SettingsRepository::new(state.pool())
        .set_current_customer(Some(&customer.id))
        .await?;

    Ok(Json(customer))
}

/// List all customers, newest first (admin view).
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    Ok(Json(customers))
}

/// The current customer of the single-session flow, or `null`.
#[instrument(skip(state))]
pub async fn current(State(state): State<AppState>) -> Result<Json<Option<Customer>>> {
    let Some(customer_id) = SettingsRepository::new(state.pool())
        .current_customer_id()
        .await?
    else {
        return Ok(Json(None));
    };

    let customer = CustomerRepository::new(state.pool()).get(&customer_id).await?;
    Ok(Json(customer))
}
