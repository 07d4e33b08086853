//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::handlers::{categories, lab_tests, system};
use crate::error::ErrorResponse;

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "lab-catalog-api",
        description = "Read-only access to lab test categories and lab tests."
    ),
    paths(
        categories::list_categories,
        lab_tests::list_lab_tests,
        system::health_handler,
    ),
    components(schemas(ErrorResponse, system::HealthResponse)),
    tags(
        (name = "Catalog", description = "Categories and lab tests"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Swagger UI serving [`ApiDoc`] at `/swagger-ui`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}
