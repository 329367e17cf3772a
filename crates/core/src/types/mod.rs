//! Core types for Kirana.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod status;

pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use status::{InvalidStatus, OrderStatus};
