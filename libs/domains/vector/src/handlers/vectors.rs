//! CRUD and similarity-search handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use axum_helpers::JsonPayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use super::ApiState;
use crate::adapter::{InsertVectors, UpdateVectors};
use crate::error::VectorResult;
use crate::index::VectorIndex;
use crate::models::{DEFAULT_TOP_K, IndexDescription, QueryOptions, QueryResult, VectorRecord};

// ===== Request/Response DTOs =====

/// Request to search vectors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    pub query_embedding: Vec<f32>,
    #[serde(default = "default_top_k")]
    pub n_results: usize,
    /// Metadata filter, e.g. `{"genre": "docs", "year": {"$gte": 2020}}`
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub filter: Option<Value>,
    #[serde(default)]
    pub return_values: bool,
    #[serde(default = "default_true")]
    pub return_metadata: bool,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteRequest {
    pub ids: Vec<String>,
}

/// Request to fetch vectors by id
///
/// `where`, `limit`, `offset` and `include` are accepted for client
/// compatibility and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GetVectorsRequest {
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    pub success: bool,
    pub updated: usize,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PeekParams {
    /// Accepted for compatibility; does not change the response.
    pub n: Option<String>,
}

// ===== Handlers =====

/// Insert new vectors
#[utoipa::path(
    post,
    path = "/add-vectors",
    tag = "vectors",
    request_body = InsertVectors,
    responses(
        (status = 200, description = "Vectors inserted", body = SuccessResponse),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(count = payload.embeddings.len()))]
pub async fn add_vectors<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(payload): JsonPayload<InsertVectors>,
) -> VectorResult<Json<SuccessResponse>> {
    let mutation = state.service.insert(payload).await?;
    debug!(inserted = mutation.count, "Vectors inserted");
    Ok(Json(SuccessResponse { success: true }))
}

/// Search for similar vectors
#[utoipa::path(
    post,
    path = "/query",
    tag = "vectors",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Matches, best first", body = QueryResult),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(top_k = request.n_results))]
pub async fn query_vectors<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(request): JsonPayload<QueryRequest>,
) -> VectorResult<Json<QueryResult>> {
    let mut options = QueryOptions::new(request.n_results)
        .with_values(request.return_values)
        .with_metadata(request.return_metadata);
    if let Some(filter) = request.filter {
        options = options.with_filter(filter);
    }

    let result = state.service.query(request.query_embedding, options).await?;
    Ok(Json(result))
}

/// Delete vectors by id
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "vectors",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Vectors deleted (unknown ids are ignored)", body = SuccessResponse),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn delete_vectors<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(request): JsonPayload<DeleteRequest>,
) -> VectorResult<Json<SuccessResponse>> {
    let mutation = state.service.delete(request.ids).await?;
    debug!(deleted = mutation.count, "Vectors deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// Fetch vectors by id
#[utoipa::path(
    post,
    path = "/get-vectors",
    tag = "vectors",
    request_body = GetVectorsRequest,
    responses(
        (status = 200, description = "Stored records; unknown ids are omitted", body = Vec<VectorRecord>),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn get_vectors<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(request): JsonPayload<GetVectorsRequest>,
) -> VectorResult<Json<Vec<VectorRecord>>> {
    let records = state.service.get(request.ids.unwrap_or_default()).await?;
    Ok(Json(records))
}

/// Overwrite vectors; ids without an embedding are skipped
#[utoipa::path(
    put,
    path = "/update-vectors",
    tag = "vectors",
    request_body = UpdateVectors,
    responses(
        (status = 200, description = "Vectors updated", body = UpdateResponse),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(count = payload.ids.len()))]
pub async fn update_vectors<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(payload): JsonPayload<UpdateVectors>,
) -> VectorResult<Json<UpdateResponse>> {
    let updated = state.service.update(payload).await?;
    Ok(Json(UpdateResponse {
        success: true,
        updated,
    }))
}

/// Describe the index
#[utoipa::path(
    get,
    path = "/peek",
    tag = "vectors",
    params(PeekParams),
    responses(
        (status = 200, description = "Index description", body = IndexDescription),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, params))]
pub async fn peek<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    Query(params): Query<PeekParams>,
) -> VectorResult<Json<IndexDescription>> {
    let n = lenient_count(params.n.as_deref(), DEFAULT_TOP_K);
    debug!(n, "Peek requested");

    let description = state.service.describe().await?;
    Ok(Json(description))
}

/// Parses a count query parameter, falling back to `default` on anything
/// that is not a non-negative integer.
pub(super) fn lenient_count(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_defaults() {
        let request: QueryRequest =
            serde_json::from_value(json!({"query_embedding": [0.1]})).unwrap();
        assert_eq!(request.n_results, 10);
        assert!(request.filter.is_none());
        assert!(!request.return_values);
        assert!(request.return_metadata);
    }

    #[test]
    fn test_get_request_ignores_unsupported_fields() {
        let request: GetVectorsRequest = serde_json::from_value(json!({
            "where": {"a": 1},
            "limit": 5,
            "offset": 2,
            "include": ["metadatas"]
        }))
        .unwrap();
        assert!(request.ids.is_none());
    }

    #[test]
    fn test_lenient_count() {
        assert_eq!(lenient_count(None, 10), 10);
        assert_eq!(lenient_count(Some("25"), 10), 25);
        assert_eq!(lenient_count(Some("abc"), 10), 10);
        assert_eq!(lenient_count(Some("-3"), 10), 10);
    }
}
