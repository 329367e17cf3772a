//! CSV export handlers.
//!
//! Responses carry a `Content-Disposition` attachment header so a browser
//! downloads the file instead of rendering it.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::Result;
use crate::export;
use crate::state::AppState;

/// Export all customers as CSV.
#[instrument(skip(state))]
pub async fn customers(State(state): State<AppState>) -> Result<Response> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    let csv = export::customers_csv(&customers)?;
    tracing::info!(count = customers.len(), "customers exported");
    Ok(csv_attachment("customers.csv", csv))
}

/// Export all orders as CSV.
#[instrument(skip(state))]
pub async fn orders(State(state): State<AppState>) -> Result<Response> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    let csv = export::orders_csv(&orders)?;
    tracing::info!(count = orders.len(), "orders exported");
    Ok(csv_attachment("orders.csv", csv))
}

fn csv_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
