//! Kirana server library.
//!
//! This crate provides the HTTP API as a library, allowing the CLI to reuse
//! the repositories and export formatting, and tests to exercise handlers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod routes;
pub mod state;
