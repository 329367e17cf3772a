//! Kirana Core - Shared domain library.
//!
//! This crate provides the domain model used across all Kirana components:
//! - `server` - HTTP API serving customers and the store admin
//! - `cli` - Command-line tools for migrations, seeding, and export
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The one piece of real behavior here is the order engine
//! ([`order::build_order`]), which turns a customer's product selection into
//! a priced, snapshotted order draft.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, phone numbers, and
//!   order status
//! - [`catalog`] - Categories and products as configured by the admin
//! - [`customer`] - Customer profiles and registration payloads
//! - [`order`] - Orders, line items, and the order engine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod customer;
pub mod order;
pub mod types;

pub use catalog::{Category, Product};
pub use customer::{Customer, NewCustomer, RegistrationError};
pub use order::{Order, OrderBuildError, OrderDraft, OrderItem, build_order};
pub use types::*;
