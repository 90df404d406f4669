use async_trait::async_trait;

use crate::error::VectorResult;

/// Trait for embedding generation providers
///
/// Turns free text into a query vector. The vector's dimensionality must
/// match the index the gateway fronts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;
}
