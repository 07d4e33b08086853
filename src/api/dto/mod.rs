//! Data Transfer Objects for REST request/response serialization.
//!
//! Row payloads are passed through as [`crate::persistence::Record`]
//! maps; only request parameters and fixed-shape responses live here.

pub mod query_dto;

pub use query_dto::*;
