//! JSON body extractor that does not insist on a `Content-Type` header.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Deserializes the request body as JSON regardless of the declared content
/// type.
///
/// Scripted clients frequently send JSON bodies on `DELETE` requests or with
/// a missing header; these are accepted. Any parse or shape error is rejected
/// as [`AppError::BadRequest`] so it renders as a `400 {"error": ...}`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonPayload;
///
/// async fn delete(JsonPayload(body): JsonPayload<DeleteVectors>) -> impl IntoResponse {
///     /* ... */
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(rejection.body_text())
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;

        serde_json::from_slice(&bytes)
            .map(JsonPayload)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, extract::DefaultBodyLimit, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Ids {
        ids: Vec<String>,
    }

    async fn count(JsonPayload(body): JsonPayload<Ids>) -> String {
        body.ids.len().to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/", post(count))
            .layer(DefaultBodyLimit::max(64))
    }

    async fn send(body: impl Into<Body>) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(body.into())
            .unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_accepts_body_without_content_type() {
        assert_eq!(send(r#"{"ids":["a","b"]}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_wrong_shape_as_bad_request() {
        assert_eq!(send(r#"{"ids":"a"}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(send("").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_oversized_body() {
        let big = format!(r#"{{"ids":["{}"]}}"#, "x".repeat(128));
        assert_eq!(send(big).await, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
