//! Order status.

use serde::{Deserialize, Serialize};

/// Delivery status of an order.
///
/// The lifecycle reads `received → in_transit → delivered`, but the admin
/// may set any status from any other - corrections happen (a driver marked
/// delivered too early, an order pulled back to the shop). Setting the
/// current status again is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed and is waiting at the shop.
    #[default]
    Received,
    /// Order is out for delivery.
    InTransit,
    /// Order has been handed to the customer.
    Delivered,
}

impl OrderStatus {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Received, Self::InTransit, Self::Delivered];

    /// The wire/database representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a status string is outside the enumerated set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid order status: {0:?} (expected received, in_transit, or delivered)")]
pub struct InvalidStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}
