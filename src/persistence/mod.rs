//! Persistence layer: read-only access to the lab catalog tables.
//!
//! Provides the [`CatalogStore`] trait, the single capability handlers
//! depend on: execute one [`CatalogQuery`] and return its rows. The
//! production implementation wraps a `sqlx::PgPool`; an in-memory
//! implementation backs tests and local development.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

pub use models::{CatalogQuery, Record};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a [`CatalogStore`].
///
/// Every variant is a data-access failure from the client's point of
/// view; the detail is for server-side logs only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Driver or pool failure (connection loss, query error, checkout timeout).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The query did not complete within the per-query timeout.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// A returned row could not be interpreted as a column map.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Runs a store call under `limit`, turning expiry into
/// [`StoreError::Timeout`]. The call's future is dropped on expiry, which
/// returns any checked-out connection to its pool.
///
/// # Errors
///
/// Returns the call's own error converted into [`StoreError`], or
/// [`StoreError::Timeout`] when `limit` elapses first.
pub async fn with_timeout<T, E, F>(limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StoreError>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

/// Read-only access to the catalog tables.
///
/// Implementations must be `Send + Sync`: a single instance is shared by
/// every in-flight request.
#[async_trait]
pub trait CatalogStore: Debug + Send + Sync {
    /// Executes `query` and returns its rows in store order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on any data-access failure, including
    /// timeouts. A query that matches nothing returns `Ok(vec![])`.
    async fn fetch_rows(&self, query: &CatalogQuery) -> StoreResult<Vec<Record>>;

    /// Checks that the store answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store is unreachable.
    async fn ping(&self) -> StoreResult<()>;
}
