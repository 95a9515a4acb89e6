//! Path and query extractors
//!
//! Drop-in replacements for axum's `Path` and `Query` whose rejections are
//! [`ApiError`]s, so malformed ids and query strings get the same JSON error
//! body as every other failure instead of axum's plain-text one.

use crate::core::error::ApiError;
use axum::extract::FromRequestParts;

/// Typed path parameters, rejected with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Typed query string, rejected with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CollectionParams;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn id(Path(id): Path<i64>) -> String {
        id.to_string()
    }

    async fn page(Query(params): Query<CollectionParams>) -> String {
        params.page.unwrap_or(0).to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(id))
            .route("/items", get(page))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_valid_parameters_pass_through() {
        assert_eq!(status_of("/items/4").await, StatusCode::OK);
        assert_eq!(status_of("/items?page=2&sort=name_asc").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_parameters_are_bad_requests() {
        assert_eq!(status_of("/items/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/items?page=abc").await, StatusCode::BAD_REQUEST);
    }
}
