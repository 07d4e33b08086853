//! In-memory catalog store for tests and local development.
//!
//! Evaluates every [`CatalogQuery`] with the same semantics as the SQL
//! templates: position ordering, exact name match, lab test columns only.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::models::{CatalogQuery, Record};
use super::{CatalogStore, StoreError, StoreResult};

/// Catalog store backed by two in-memory tables.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    categories: Vec<Record>,
    lab_tests: Vec<Record>,
    unreachable: bool,
    queries_issued: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails every call as if the database were down.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Replaces the `categories` table. Non-object values are ignored.
    #[must_use]
    pub fn with_categories(mut self, rows: impl IntoIterator<Item = Value>) -> Self {
        self.categories = into_records(rows);
        self
    }

    /// Replaces the `lab_tests` table. Non-object values are ignored.
    #[must_use]
    pub fn with_lab_tests(mut self, rows: impl IntoIterator<Item = Value>) -> Self {
        self.lab_tests = into_records(rows);
        self
    }

    /// Number of queries executed so far, failed ones included.
    #[must_use]
    pub fn queries_issued(&self) -> usize {
        self.queries_issued.load(Ordering::Relaxed)
    }

    fn lab_tests_for(&self, category: &str) -> Vec<Record> {
        let category_ids: Vec<&Value> = self
            .categories
            .iter()
            .filter(|c| c.get("category_name").and_then(Value::as_str) == Some(category))
            .filter_map(|c| c.get("id"))
            .collect();

        self.lab_tests
            .iter()
            .filter(|lt| {
                lt.get("category_id")
                    .is_some_and(|id| category_ids.contains(&id))
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn fetch_rows(&self, query: &CatalogQuery) -> StoreResult<Vec<Record>> {
        self.queries_issued.fetch_add(1, Ordering::Relaxed);
        if self.unreachable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }

        let mut rows = match query {
            CatalogQuery::Categories => self.categories.clone(),
            CatalogQuery::LabTestsByCategory { category } => self.lab_tests_for(category),
        };
        rows.sort_by_key(position);
        Ok(rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        if self.unreachable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

fn into_records(rows: impl IntoIterator<Item = Value>) -> Vec<Record> {
    rows.into_iter()
        .filter_map(|row| match row {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

// Rows without a numeric position sort last, like NULLs under ASC.
fn position(row: &Record) -> (bool, i64) {
    match row.get("position").and_then(Value::as_i64) {
        Some(p) => (false, p),
        None => (true, 0),
    }
}
