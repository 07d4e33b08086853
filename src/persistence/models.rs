//! Row representation and the query templates the service can issue.

use serde_json::{Map, Value};

/// One row as a column-name to value map, in the column order the store
/// returned.
pub type Record = Map<String, Value>;

/// The closed set of parameterized queries issued by the API.
///
/// Each variant owns its SQL template and bound parameters; values are
/// always bound, never spliced into the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// All categories ordered by ascending position.
    Categories,
    /// Lab tests belonging to the category with the given exact name,
    /// ordered by ascending lab test position.
    LabTestsByCategory {
        /// Value matched against `categories.category_name`.
        category: String,
    },
}

impl CatalogQuery {
    /// Builds a lab test lookup for `category`.
    #[must_use]
    pub fn lab_tests_by_category(category: impl Into<String>) -> Self {
        Self::LabTestsByCategory {
            category: category.into(),
        }
    }

    /// Returns the SQL template. Each row comes back as a single JSON
    /// object column so arbitrary table columns survive in order.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Categories => {
                "SELECT row_to_json(c) FROM categories c ORDER BY c.position ASC"
            }
            Self::LabTestsByCategory { .. } => {
                "SELECT row_to_json(lt) FROM lab_tests lt \
                 JOIN categories c ON lt.category_id = c.id \
                 WHERE c.category_name = $1 \
                 ORDER BY lt.position ASC"
            }
        }
    }

    /// Short label used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::LabTestsByCategory { .. } => "lab_tests_by_category",
        }
    }
}
