//! Users API Library
//!
//! A JSON CRUD service for a single User resource backed by SQLite.
//! The library holds the domain model, the SQLite store and the axum
//! router; the binary only wires them together.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
