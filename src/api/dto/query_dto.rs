//! Query string parameters for list endpoints.

use utoipa::IntoParams;

/// Query parameters for `GET /api/lab-tests`.
///
/// Built from the raw key/value pairs so a repeated `category` key is
/// still a present parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LabTestQuery {
    /// Exact category name, e.g. `Chemistry`. Requests without it are
    /// rejected with 400.
    pub category: Option<String>,
}

impl LabTestQuery {
    /// Picks the first non-empty `category` value out of decoded query
    /// pairs. Other keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let category = pairs
            .into_iter()
            .find(|(key, value)| key == "category" && !value.is_empty())
            .map(|(_, value)| value);
        Self { category }
    }

    /// Returns the category name if present and non-empty.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}
