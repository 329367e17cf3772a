//! Orders and the order engine.
//!
//! [`build_order`] is the only place orders come into existence, which is
//! what keeps the totals invariants true by construction: an order's
//! `grand_total` is always the sum of its line totals and `total_items` the
//! sum of its quantities.
//!
//! Line items snapshot the product name and unit price at build time. Later
//! catalog edits never change a stored order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::customer::Customer;
use crate::types::{CustomerId, OrderId, OrderStatus, PhoneNumber, ProductId};

/// One line of an order: a product's snapshotted price and ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Product name at the time the order was built.
    pub product_name: String,
    /// Unit price at the time the order was built, whole currency units.
    pub unit_price: i64,
    /// Ordered quantity. Always positive; zero-quantity selections are
    /// dropped before an item is created.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub line_total: i64,
}

/// A fully computed order that has not been persisted yet.
///
/// The id and creation timestamp are assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    /// Customer name snapshot; the customer record itself is immutable, but
    /// the order stays self-contained either way.
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    pub items: Vec<OrderItem>,
    /// Sum of all item quantities.
    pub total_items: i64,
    /// Sum of all line totals, whole currency units.
    pub grand_total: i64,
    pub status: OrderStatus,
    pub is_paid: bool,
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    pub items: Vec<OrderItem>,
    pub total_items: i64,
    pub grand_total: i64,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

/// Errors rejecting an order build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderBuildError {
    /// No line items survived: the selection was empty, all quantities were
    /// zero, or every selected product has been removed from the catalog.
    #[error("an order must contain at least one item")]
    EmptyOrder,
    /// A line total or order total left the representable `i64` range.
    #[error("order total is too large")]
    TotalOverflow,
}

/// Build an order draft from a customer, a catalog snapshot, and the
/// requested quantity per product.
///
/// Rules:
///
/// - Zero-quantity entries mean "not ordered" and are skipped.
/// - Selection entries for products absent from the catalog snapshot are
///   silently dropped (the admin may have deleted them since the client
///   loaded its menu).
/// - Items follow catalog order, so the resulting order is deterministic
///   regardless of selection-map iteration order.
/// - The store-open gate is NOT checked here; the HTTP edge rejects
///   submissions while the store is closed before calling this.
///
/// # Errors
///
/// Returns [`OrderBuildError::EmptyOrder`] if no line items survive.
/// Returns [`OrderBuildError::TotalOverflow`] if a line total or an
/// accumulated total overflows `i64`.
pub fn build_order(
    customer: &Customer,
    catalog: &[Product],
    selection: &HashMap<ProductId, u32>,
) -> Result<OrderDraft, OrderBuildError> {
    let mut items = Vec::new();
    let mut total_items: i64 = 0;
    let mut grand_total: i64 = 0;

    for product in catalog {
        let Some(&quantity) = selection.get(&product.id) else {
            continue;
        };
        if quantity == 0 {
            continue;
        }

        let line_total = product
            .price
            .checked_mul(i64::from(quantity))
            .ok_or(OrderBuildError::TotalOverflow)?;
        total_items = total_items
            .checked_add(i64::from(quantity))
            .ok_or(OrderBuildError::TotalOverflow)?;
        grand_total = grand_total
            .checked_add(line_total)
            .ok_or(OrderBuildError::TotalOverflow)?;
        items.push(OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total,
        });
    }

    if items.is_empty() {
        return Err(OrderBuildError::EmptyOrder);
    }

    Ok(OrderDraft {
        customer_id: customer.id.clone(),
        customer_name: customer.full_name.clone(),
        customer_phone: customer.phone_number.clone(),
        items,
        total_items,
        grand_total,
        status: OrderStatus::Received,
        is_paid: false,
    })
}
