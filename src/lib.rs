//! # lab-catalog-api
//!
//! Read-only REST API over the lab catalog: categories and the lab tests
//! scoped by category. Every request maps to exactly one parameterized
//! PostgreSQL query whose rows are returned as a JSON array.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── ApiError → JSON error body (error)
//!     │
//!     ├── CatalogStore trait (persistence/)
//!     │
//!     └── PostgreSQL (sqlx::PgPool)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
