use std::sync::Arc;
use std::time::Instant;

use observability::{Outcome, VectorMetrics};
use tracing::{debug, info};

use crate::adapter::{InsertVectors, UpdateVectors};
use crate::embedding::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::index::VectorIndex;
use crate::models::{
    IndexDescription, Mutation, QueryOptions, QueryResult, TEXT_KEY, VectorRecord, VisualPoint,
};

/// Default dimensionality of the embedding scheme.
pub const DEFAULT_DIMENSIONS: usize = 1536;

/// Upper bound on the visualization sample.
pub const MAX_SAMPLE_SIZE: usize = 100;

/// Matches used to answer a chat question.
pub const CHAT_TOP_K: usize = 3;

/// Vector service providing the gateway's operations
///
/// Adapts wire payloads, calls the index, and records per-operation metrics.
pub struct VectorService<I: VectorIndex> {
    index: I,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    dimensions: usize,
}

impl<I: VectorIndex> VectorService<I> {
    pub fn new(index: I) -> Self {
        Self {
            index,
            embedding_provider: None,
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Probe size used when the index does not report its dimensionality.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub async fn insert(&self, payload: InsertVectors) -> VectorResult<Mutation> {
        observed("insert", self.insert_records(payload)).await
    }

    pub async fn query(&self, vector: Vec<f32>, options: QueryOptions) -> VectorResult<QueryResult> {
        observed("query", self.index.query(vector, options)).await
    }

    /// Ids are passed to the index unmodified; deleting unknown ids succeeds.
    pub async fn delete(&self, ids: Vec<String>) -> VectorResult<Mutation> {
        observed("delete", self.index.delete_by_ids(ids)).await
    }

    pub async fn get(&self, ids: Vec<String>) -> VectorResult<Vec<VectorRecord>> {
        observed("get", self.index.get_by_ids(ids)).await
    }

    /// Upserts every id that has an embedding; returns how many were written.
    pub async fn update(&self, payload: UpdateVectors) -> VectorResult<usize> {
        observed("update", self.update_records(payload)).await
    }

    pub async fn describe(&self) -> VectorResult<IndexDescription> {
        observed("describe", self.index.describe()).await
    }

    /// Up to `size` entries nearest to the zero vector, with values and
    /// metadata. Not a uniform sample.
    pub async fn sample(&self, size: usize) -> VectorResult<Vec<VisualPoint>> {
        observed("visualize", self.sample_points(size)).await
    }

    /// Answers `question` with the stored text of its nearest matches.
    pub async fn chat(&self, question: &str) -> VectorResult<String> {
        observed("chat", self.answer(question)).await
    }

    async fn insert_records(&self, payload: InsertVectors) -> VectorResult<Mutation> {
        let records = payload.into_records()?;
        let count = records.len();
        let mutation = self.index.insert(records).await?;
        VectorMetrics::record_vectors_written("insert", count);
        Ok(mutation)
    }

    async fn update_records(&self, payload: UpdateVectors) -> VectorResult<usize> {
        let records = payload.into_records()?;
        if records.is_empty() {
            return Err(VectorError::NoValidVectors);
        }
        let count = records.len();
        self.index.upsert(records).await?;
        VectorMetrics::record_vectors_written("update", count);
        Ok(count)
    }

    async fn sample_points(&self, size: usize) -> VectorResult<Vec<VisualPoint>> {
        let description = self.index.describe().await?;
        info!(
            index = %description.name,
            vectors = description.vector_count,
            dimensions = description.dimensions,
            "Sampling index for visualization"
        );

        let dimensions = match description.dimensions {
            0 => self.dimensions,
            n => n as usize,
        };
        let options = QueryOptions::new(size.clamp(1, MAX_SAMPLE_SIZE))
            .with_values(true)
            .with_metadata(true);

        let result = self.index.query(vec![0.0; dimensions], options).await?;
        let points: Vec<VisualPoint> = result.matches.into_iter().map(VisualPoint::from).collect();
        VectorMetrics::set_sample_size(points.len());
        Ok(points)
    }

    async fn answer(&self, question: &str) -> VectorResult<String> {
        let provider = self
            .embedding_provider
            .as_ref()
            .ok_or_else(|| VectorError::Config("No embedding provider configured".to_string()))?;

        let embedding = provider.embed(question).await?;
        debug!(provider = provider.name(), dimensions = embedding.len(), "Embedded question");

        let result = self
            .index
            .query(embedding, QueryOptions::new(CHAT_TOP_K).with_metadata(true))
            .await?;
        Ok(compose_answer(question, &result))
    }
}

const NO_MATCHES_ANSWER: &str =
    "Colbie: Beep boop! I'm sorry, I couldn't find any information about that. 🤖";

fn compose_answer(question: &str, result: &QueryResult) -> String {
    if result.matches.is_empty() {
        return NO_MATCHES_ANSWER.to_string();
    }

    let relevant: Vec<&str> = result
        .matches
        .iter()
        .filter_map(|m| m.metadata.as_ref()?.get(TEXT_KEY)?.as_str())
        .filter(|text| !text.is_empty())
        .collect();

    format!(
        "Colbie: Beep boop! Here's what I found about \"{}\":\n\n{} ✨",
        question,
        relevant.join("\n\n")
    )
}

async fn observed<T>(
    operation: &'static str,
    fut: impl Future<Output = VectorResult<T>>,
) -> VectorResult<T> {
    let start = Instant::now();
    let result = fut.await;
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(e) if e.is_client_error() => Outcome::Rejected,
        Err(_) => Outcome::Failed,
    };
    VectorMetrics::record_operation(operation, outcome, start.elapsed());
    result
}
