use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{IndexDescription, Mutation, QueryOptions, QueryResult, VectorRecord};

/// The remote vector index the gateway fronts.
///
/// Implementations own distance computation and storage; the gateway only
/// reshapes payloads around these calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert new records. Fails if any id already exists.
    async fn insert(&self, records: Vec<VectorRecord>) -> VectorResult<Mutation>;

    /// Insert or overwrite records.
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<Mutation>;

    /// Nearest neighbours of `vector`, best match first.
    async fn query(&self, vector: Vec<f32>, options: QueryOptions) -> VectorResult<QueryResult>;

    /// Delete by id. Unknown ids are not an error.
    async fn delete_by_ids(&self, ids: Vec<String>) -> VectorResult<Mutation>;

    /// Fetch stored records in request order. Unknown ids are omitted; an id
    /// requested twice is returned twice.
    async fn get_by_ids(&self, ids: Vec<String>) -> VectorResult<Vec<VectorRecord>>;

    async fn describe(&self) -> VectorResult<IndexDescription>;
}
