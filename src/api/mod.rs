//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Catalog endpoints are mounted under `/api`; `/health` sits at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the REST router with all endpoints and JSON 404/405 fallbacks.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .method_not_allowed_fallback(handlers::system::method_not_allowed)
        .fallback(handlers::system::not_found)
}

/// Builds the complete application: routes, OpenAPI UI (when enabled),
/// request tracing and permissive CORS, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(openapi::swagger_ui());

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::memory::InMemoryStore;
    use crate::persistence::{
        CatalogQuery, CatalogStore, Record, StoreError, StoreResult, with_timeout,
    };

    /// Store that fails the test if any query reaches it.
    #[derive(Debug)]
    struct ForbiddenStore;

    #[async_trait]
    impl CatalogStore for ForbiddenStore {
        async fn fetch_rows(&self, query: &CatalogQuery) -> StoreResult<Vec<Record>> {
            panic!("unexpected query: {query:?}");
        }

        async fn ping(&self) -> StoreResult<()> {
            panic!("unexpected ping");
        }
    }

    /// Store whose every call outlives the query timeout.
    #[derive(Debug)]
    struct StalledStore {
        limit: Duration,
    }

    #[async_trait]
    impl CatalogStore for StalledStore {
        async fn fetch_rows(&self, _query: &CatalogQuery) -> StoreResult<Vec<Record>> {
            with_timeout(self.limit, async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok::<_, StoreError>(Vec::new())
            })
            .await
        }

        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    fn sample_store() -> InMemoryStore {
        InMemoryStore::new()
            .with_categories([
                json!({"id": 2, "category_name": "Hematology", "position": 2}),
                json!({"id": 1, "category_name": "Chemistry", "position": 1}),
            ])
            .with_lab_tests([
                json!({"id": 11, "category_id": 1, "name": "Lipid Panel", "position": 2}),
                json!({"id": 10, "category_id": 1, "name": "Glucose", "position": 1}),
            ])
    }

    async fn get(store: Arc<dyn CatalogStore>, uri: &str) -> (StatusCode, String, String) {
        let app = build_app(AppState::new(store));
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let Ok(body) = String::from_utf8(bytes.to_vec()) else {
            panic!("utf-8 body");
        };
        (status, content_type, body)
    }

    #[tokio::test]
    async fn categories_in_position_order() {
        let (status, content_type, body) = get(Arc::new(sample_store()), "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(
            body,
            r#"[{"id":1,"category_name":"Chemistry","position":1},{"id":2,"category_name":"Hematology","position":2}]"#
        );
    }

    #[tokio::test]
    async fn lab_tests_of_known_category() {
        let (status, _, body) =
            get(Arc::new(sample_store()), "/api/lab-tests?category=Chemistry").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"[{"id":10,"category_id":1,"name":"Glucose","position":1},{"id":11,"category_id":1,"name":"Lipid Panel","position":2}]"#
        );
    }

    #[tokio::test]
    async fn lab_tests_of_encoded_category_name() {
        let store = InMemoryStore::new()
            .with_categories([json!({"id": 7, "category_name": "Blood Bank", "position": 1})])
            .with_lab_tests([json!({"id": 70, "category_id": 7, "name": "ABO", "position": 1})]);
        let (status, _, body) = get(Arc::new(store), "/api/lab-tests?category=Blood%20Bank").await;
        assert_eq!(status, StatusCode::OK);
        let Ok(rows) = serde_json::from_str::<Vec<Value>>(&body) else {
            panic!("json array");
        };
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn unknown_category_is_empty_array() {
        let (status, _, body) =
            get(Arc::new(sample_store()), "/api/lab-tests?category=Microbiology").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn missing_category_never_reaches_store() {
        for uri in [
            "/api/lab-tests",
            "/api/lab-tests?category=",
            "/api/lab-tests?other=Chemistry",
        ] {
            let (status, content_type, body) = get(Arc::new(ForbiddenStore), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(content_type, "application/json");
            assert_eq!(body, r#"{"error":"Missing category parameter"}"#);
        }
    }

    #[tokio::test]
    async fn store_failure_maps_to_fixed_messages() {
        let store: Arc<dyn CatalogStore> = Arc::new(InMemoryStore::unreachable());

        let (status, _, body) = get(Arc::clone(&store), "/api/categories").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Server error"}"#);

        let (status, _, body) = get(store, "/api/lab-tests?category=Chemistry").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Failed to get lab tests"}"#);
    }

    #[tokio::test]
    async fn repeated_requests_are_byte_identical() {
        let store: Arc<dyn CatalogStore> = Arc::new(sample_store());
        let (_, _, first) = get(Arc::clone(&store), "/api/lab-tests?category=Chemistry").await;
        let (_, _, second) = get(store, "/api/lab-tests?category=Chemistry").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn repeated_category_uses_first_value() {
        let store = Arc::new(sample_store());
        let (status, _, body) = get(
            Arc::clone(&store) as Arc<dyn CatalogStore>,
            "/api/lab-tests?category=Chemistry&category=Hematology",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let Ok(rows) = serde_json::from_str::<Vec<Value>>(&body) else {
            panic!("json array");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(store.queries_issued(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_store_answers_500_instead_of_hanging() {
        let store = StalledStore {
            limit: Duration::from_millis(100),
        };
        let result = store
            .fetch_rows(&CatalogQuery::lab_tests_by_category("Chemistry"))
            .await;
        assert!(matches!(result, Err(StoreError::Timeout(_))));

        let store: Arc<dyn CatalogStore> = Arc::new(StalledStore {
            limit: Duration::from_millis(100),
        });
        let (status, _, body) = get(Arc::clone(&store), "/api/lab-tests?category=Chemistry").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Failed to get lab tests"}"#);

        let (status, _, body) = get(store, "/api/categories").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Server error"}"#);
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        let app = build_app(AppState::new(Arc::new(ForbiddenStore)));
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/categories")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        assert_eq!(bytes.as_ref(), br#"{"error":"Method not allowed"}"#);
    }

    #[tokio::test]
    async fn unknown_path_is_json_not_found() {
        let (status, _, body) = get(Arc::new(ForbiddenStore), "/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn health_reflects_store() {
        let (status, _, _) = get(Arc::new(sample_store()), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = get(Arc::new(InMemoryStore::unreachable()), "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains(r#""status":"degraded""#));
    }

    #[tokio::test]
    async fn any_origin_is_allowed() {
        let app = build_app(AppState::new(Arc::new(sample_store())));
        let Ok(request) = Request::builder()
            .uri("/api/categories")
            .header(header::ORIGIN, "https://lab.example")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
