mod chat;
mod vectors;
mod visualize;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::adapter::{InsertVectors, UpdateVectors};
use crate::index::VectorIndex;
use crate::models::{
    DistanceMetric, IndexDescription, IndexStatus, QueryMatch, QueryResult, VectorRecord,
};
use crate::service::VectorService;
use crate::template::VisualizationTemplate;

pub use chat::{ChatRequest, ChatResponse};
pub use vectors::{
    DeleteRequest, GetVectorsRequest, PeekParams, QueryRequest, SuccessResponse, UpdateResponse,
};
pub use visualize::VisualizeParams;

/// Shared handler state. Immutable after startup.
pub struct ApiState<I: VectorIndex> {
    pub service: Arc<VectorService<I>>,
    pub template: Arc<VisualizationTemplate>,
}

impl<I: VectorIndex> ApiState<I> {
    pub fn new(service: VectorService<I>, template: VisualizationTemplate) -> Self {
        Self {
            service: Arc::new(service),
            template: Arc::new(template),
        }
    }
}

impl<I: VectorIndex> Clone for ApiState<I> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            template: Arc::clone(&self.template),
        }
    }
}

/// OpenAPI documentation for the vector gateway
#[derive(OpenApi)]
#[openapi(
    paths(
        vectors::add_vectors,
        vectors::query_vectors,
        vectors::delete_vectors,
        vectors::get_vectors,
        vectors::update_vectors,
        vectors::peek,
        visualize::visualize,
        chat::chat,
    ),
    components(
        schemas(
            InsertVectors, UpdateVectors, QueryRequest, DeleteRequest, GetVectorsRequest,
            SuccessResponse, UpdateResponse, QueryResult, QueryMatch, VectorRecord,
            IndexDescription, DistanceMetric, IndexStatus, ChatRequest, ChatResponse,
            axum_helpers::ErrorResponse
        ),
        responses(
            axum_helpers::errors::responses::BadRequestResponse,
            axum_helpers::errors::responses::InternalServerErrorResponse
        )
    ),
    tags(
        (name = "vectors", description = "Vector CRUD and similarity search"),
        (name = "visualization", description = "Client-side rendering of an index sample"),
        (name = "chat", description = "Question answering over stored documents")
    )
)]
pub struct VectorApiDoc;

/// Create the gateway router. Routes are mounted at the root.
pub fn router<I: VectorIndex + 'static>(state: ApiState<I>) -> Router {
    Router::new()
        .route("/add-vectors", post(vectors::add_vectors::<I>))
        .route("/query", post(vectors::query_vectors::<I>))
        .route("/delete", delete(vectors::delete_vectors::<I>))
        .route("/get-vectors", post(vectors::get_vectors::<I>))
        .route("/update-vectors", put(vectors::update_vectors::<I>))
        .route("/peek", get(vectors::peek::<I>))
        .route("/visualize", get(visualize::visualize::<I>))
        .route("/chat", post(chat::chat::<I>))
        .with_state(state)
}
