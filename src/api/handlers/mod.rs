//! REST endpoint handlers organized by resource.

pub mod categories;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all catalog routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(categories::routes())
        .merge(lab_tests::routes())
}
