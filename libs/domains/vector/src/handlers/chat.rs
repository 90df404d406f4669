//! Question answering over stored documents.

use axum::{Json, extract::State};
use axum_helpers::JsonPayload;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::ApiState;
use crate::error::VectorResult;
use crate::index::VectorIndex;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Answer a question from the three closest stored documents
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer assembled from matching documents", body = ChatResponse),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn chat<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    JsonPayload(request): JsonPayload<ChatRequest>,
) -> VectorResult<Json<ChatResponse>> {
    let response = state.service.chat(&request.question).await?;
    Ok(Json(ChatResponse { response }))
}
