//! Category listing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::CatalogQuery;

/// `GET /api/categories` — All categories in display order.
///
/// # Errors
///
/// Returns [`ApiError::CategoriesUnavailable`] on any store failure.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    summary = "List categories",
    description = "Returns every category row ordered by ascending position.",
    responses(
        (status = 200, description = "Category rows", body = Vec<serde_json::Value>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    match state.store.fetch_rows(&CatalogQuery::Categories).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!(error = %e, "failed to list categories");
            Err(ApiError::CategoriesUnavailable(e))
        }
    }
}

/// Category routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}
