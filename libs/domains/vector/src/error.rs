use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Message returned when an update batch contains no usable embeddings.
pub const NO_VALID_VECTORS: &str = "No valid vectors to update";

#[derive(Debug, Error)]
pub enum VectorError {
    /// Caller-correctable payload problem.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Update request in which every position lacked an embedding.
    #[error("No valid vectors to update")]
    NoValidVectors,

    /// The index rejected or failed the call; the message is surfaced verbatim.
    #[error("{0}")]
    Index(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

pub type VectorResult<T> = Result<T, VectorError>;

impl VectorError {
    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(self, VectorError::Validation(_) | VectorError::NoValidVectors)
    }
}

impl From<qdrant_client::QdrantError> for VectorError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        VectorError::Index(err.to_string())
    }
}

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        VectorError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        VectorError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert VectorError to AppError for the `{"error": ...}` envelope
impl From<VectorError> for AppError {
    fn from(err: VectorError) -> Self {
        let message = err.to_string();
        match err {
            VectorError::Validation(_) | VectorError::NoValidVectors => AppError::BadRequest(message),
            VectorError::Index(_)
            | VectorError::Embedding(_)
            | VectorError::Config(_)
            | VectorError::Internal(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for VectorError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
