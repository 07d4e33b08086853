//! PostgreSQL implementation of the catalog store.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{CatalogQuery, Record};
use super::{CatalogStore, StoreError, StoreResult, with_timeout};
use crate::config::DatabaseConfig;

/// PostgreSQL-backed catalog store using a fixed-size `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgCatalogStore {
    /// Creates a store around an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Builds the connection pool described by `config`.
    ///
    /// The pool connects lazily: no connection is opened until the first
    /// query, so an unreachable database surfaces as a query failure
    /// rather than a startup failure.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the connection string cannot
    /// be parsed.
    pub fn connect_lazy(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy(&config.url)?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "database pool configured"
        );

        Ok(Self::new(
            pool,
            Duration::from_secs(config.query_timeout_secs),
        ))
    }

    /// Closes every pooled connection and waits for checked-out
    /// connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn fetch_rows(&self, query: &CatalogQuery) -> StoreResult<Vec<Record>> {
        let statement = sqlx::query_scalar::<_, Value>(query.sql());
        let statement = match query {
            CatalogQuery::Categories => statement,
            CatalogQuery::LabTestsByCategory { category } => statement.bind(category.as_str()),
        };

        let rows = with_timeout(self.query_timeout, statement.fetch_all(&self.pool)).await?;

        rows.into_iter()
            .map(|value| match value {
                Value::Object(record) => Ok(record),
                other => Err(StoreError::MalformedRow(format!(
                    "expected a JSON object per row, got {other}"
                ))),
            })
            .collect()
    }

    async fn ping(&self) -> StoreResult<()> {
        with_timeout(self.query_timeout, sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}
