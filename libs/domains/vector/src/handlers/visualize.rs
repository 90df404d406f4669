//! HTML sample of the index.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde::Deserialize;
use tracing::{error, instrument};
use utoipa::IntoParams;

use super::ApiState;
use super::vectors::lenient_count;
use crate::error::VectorResult;
use crate::index::VectorIndex;
use crate::service::MAX_SAMPLE_SIZE;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct VisualizeParams {
    /// Sample size, clamped to 1..=100. Defaults to 100.
    pub n: Option<String>,
}

/// Render a sample of the index as an interactive scatter plot
#[utoipa::path(
    get,
    path = "/visualize",
    tag = "visualization",
    params(VisualizeParams),
    responses(
        (status = 200, description = "HTML page with the sampled vectors embedded", content_type = "text/html"),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, params))]
pub async fn visualize<I: VectorIndex>(
    State(state): State<ApiState<I>>,
    Query(params): Query<VisualizeParams>,
) -> Response {
    let size = lenient_count(params.n.as_deref(), MAX_SAMPLE_SIZE);

    match render(&state, size).await {
        Ok(html) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            html,
        )
            .into_response(),
        Err(e) => {
            error!("Visualization error: {}", e);
            AppError::InternalServerError(e.to_string()).into_response()
        }
    }
}

async fn render<I: VectorIndex>(state: &ApiState<I>, size: usize) -> VectorResult<String> {
    let points = state.service.sample(size).await?;
    state.template.render(&points)
}
