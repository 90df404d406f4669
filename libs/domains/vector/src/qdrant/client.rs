use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, DeletePointsBuilder, Distance, GetPointsBuilder, PointId,
    PointStruct, PointsIdsList, RetrievedPoint, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::QdrantConfig;
use super::filter::to_qdrant_filter;
use super::payload::{from_payload, to_payload};
use crate::error::{VectorError, VectorResult};
use crate::index::VectorIndex;
use crate::models::{
    DistanceMetric, IndexDescription, IndexStatus, Mutation, QueryMatch, QueryOptions,
    QueryResult, VectorRecord,
};

/// Qdrant-backed implementation of [`VectorIndex`] over a single collection.
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
}

impl QdrantIndex {
    pub fn new(config: QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorError::Index(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            collection: config.collection,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Creates the collection with cosine distance if it does not exist yet.
    ///
    /// Returns `true` when the collection was created.
    pub async fn ensure_collection(&self, dimensions: u64) -> VectorResult<bool> {
        if self.client.collection_exists(&self.collection).await? {
            return Ok(false);
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dimensions, Distance::Cosine)),
            )
            .await?;

        info!(collection = %self.collection, dimensions, "Created Qdrant collection");
        Ok(true)
    }

    async fn fetch(&self, ids: &[String], with_vectors: bool) -> VectorResult<Vec<RetrievedPoint>> {
        let point_ids: Vec<PointId> = ids.iter().map(|id| point_id(id)).collect();

        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, point_ids)
                    .with_vectors(with_vectors)
                    .with_payload(true),
            )
            .await?;

        Ok(response.result)
    }

    async fn write(&self, records: Vec<VectorRecord>) -> VectorResult<Mutation> {
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();

        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|r| PointStruct::new(point_id(&r.id), r.values, to_payload(&r.id, r.metadata)))
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await?;

        Ok(Mutation::new(ids))
    }
}

/// Record ids are free-form strings; Qdrant needs a UUID, so derive one
/// deterministically.
pub fn point_id(record_id: &str) -> PointId {
    PointId::from(Uuid::new_v5(&Uuid::NAMESPACE_OID, record_id.as_bytes()).to_string())
}

fn point_id_to_string(point_id: Option<&PointId>) -> String {
    match point_id.and_then(|p| p.point_id_options.as_ref()) {
        Some(qdrant::point_id::PointIdOptions::Uuid(uuid)) => uuid.clone(),
        Some(qdrant::point_id::PointIdOptions::Num(num)) => num.to_string(),
        None => String::new(),
    }
}

fn to_distance_metric(distance: Distance) -> DistanceMetric {
    match distance {
        Distance::Euclid => DistanceMetric::Euclidean,
        Distance::Dot => DistanceMetric::DotProduct,
        Distance::Manhattan => DistanceMetric::Manhattan,
        _ => DistanceMetric::Cosine,
    }
}

/// Extract vector values from VectorsOutput
/// Note: Uses deprecated data field for now until migration to 1.18+
#[allow(deprecated)]
fn extract_vector(vectors: Option<qdrant::VectorsOutput>) -> Option<Vec<f32>> {
    match vectors?.vectors_options? {
        qdrant::vectors_output::VectorsOptions::Vector(v) => Some(v.data),
        // For named vectors, return the first one
        qdrant::vectors_output::VectorsOptions::Vectors(map) => {
            map.vectors.into_values().next().map(|v| v.data)
        }
    }
}

fn extract_config_params(config: Option<&qdrant::CollectionConfig>) -> (u64, DistanceMetric) {
    let vectors_config = config
        .and_then(|c| c.params.as_ref())
        .and_then(|p| p.vectors_config.as_ref())
        .and_then(|vc| vc.config.as_ref());

    match vectors_config {
        Some(qdrant::vectors_config::Config::Params(p)) => (p.size, to_distance_metric(p.distance())),
        Some(qdrant::vectors_config::Config::ParamsMap(map)) => map
            .map
            .values()
            .next()
            .map(|p| (p.size, to_distance_metric(p.distance())))
            .unwrap_or((0, DistanceMetric::Cosine)),
        None => (0, DistanceMetric::Cosine),
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    #[instrument(skip(self, records), fields(collection = %self.collection, count = records.len()))]
    async fn insert(&self, records: Vec<VectorRecord>) -> VectorResult<Mutation> {
        if records.is_empty() {
            return Ok(Mutation::default());
        }

        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let existing = self.fetch(&ids, false).await?;
        if let Some(point) = existing.into_iter().next() {
            let (record_id, _) = from_payload(point.payload);
            let id = record_id.unwrap_or_else(|| point_id_to_string(point.id.as_ref()));
            return Err(VectorError::Index(format!(
                "Vector with id '{}' already exists",
                id
            )));
        }

        self.write(records).await
    }

    #[instrument(skip(self, records), fields(collection = %self.collection, count = records.len()))]
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<Mutation> {
        if records.is_empty() {
            return Ok(Mutation::default());
        }
        self.write(records).await
    }

    #[instrument(skip(self, vector), fields(collection = %self.collection, top_k = options.top_k))]
    async fn query(&self, vector: Vec<f32>, options: QueryOptions) -> VectorResult<QueryResult> {
        let mut builder = SearchPointsBuilder::new(&self.collection, vector, options.top_k as u64)
            .with_vectors(options.return_values)
            // Always read the payload: the record id lives there.
            .with_payload(true);

        if let Some(filter) = options.filter.as_ref().map(to_qdrant_filter).transpose()?.flatten() {
            builder = builder.filter(filter);
        }

        let response = self.client.search_points(builder).await?;

        let matches = response
            .result
            .into_iter()
            .map(|point| {
                let (record_id, metadata) = from_payload(point.payload);
                QueryMatch {
                    id: record_id.unwrap_or_else(|| point_id_to_string(point.id.as_ref())),
                    score: point.score,
                    values: if options.return_values {
                        extract_vector(point.vectors)
                    } else {
                        None
                    },
                    metadata: options.return_metadata.then_some(metadata),
                }
            })
            .collect();

        Ok(QueryResult::new(matches))
    }

    #[instrument(skip(self, ids), fields(collection = %self.collection, count = ids.len()))]
    async fn delete_by_ids(&self, ids: Vec<String>) -> VectorResult<Mutation> {
        if ids.is_empty() {
            return Ok(Mutation::default());
        }

        let point_ids: Vec<PointId> = ids.iter().map(|id| point_id(id)).collect();

        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(PointsIdsList { ids: point_ids })
                    .wait(true),
            )
            .await?;

        Ok(Mutation::new(ids))
    }

    #[instrument(skip(self, ids), fields(collection = %self.collection, count = ids.len()))]
    async fn get_by_ids(&self, ids: Vec<String>) -> VectorResult<Vec<VectorRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: HashMap<String, VectorRecord> = self
            .fetch(&ids, true)
            .await?
            .into_iter()
            .map(|point| {
                let (record_id, metadata) = from_payload(point.payload);
                let id = record_id.unwrap_or_else(|| point_id_to_string(point.id.as_ref()));
                let values = extract_vector(point.vectors).unwrap_or_default();
                (id.clone(), VectorRecord::new(id, values).with_metadata(metadata))
            })
            .collect();

        Ok(in_request_order(&ids, &found))
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn describe(&self) -> VectorResult<IndexDescription> {
        let info = self
            .client
            .collection_info(&self.collection)
            .await?
            .result
            .ok_or_else(|| VectorError::Index("Collection info missing result".to_string()))?;

        let (dimensions, metric) = extract_config_params(info.config.as_ref());

        let status = match info.status() {
            qdrant::CollectionStatus::Green => IndexStatus::Green,
            qdrant::CollectionStatus::Yellow => IndexStatus::Yellow,
            qdrant::CollectionStatus::Red => IndexStatus::Red,
            _ => IndexStatus::Grey,
        };

        Ok(IndexDescription {
            name: self.collection.clone(),
            dimensions,
            vector_count: info.points_count.unwrap_or_default(),
            metric,
            status,
        })
    }
}

/// Qdrant does not preserve request order. Repeated ids yield repeated records.
fn in_request_order(ids: &[String], found: &HashMap<String, VectorRecord>) -> Vec<VectorRecord> {
    ids.iter().filter_map(|id| found.get(id).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_order_keeps_repeats_and_drops_unknown() {
        let found: HashMap<String, VectorRecord> = [
            ("a", vec![0.5f32]),
            ("b", vec![0.25f32]),
        ]
        .into_iter()
        .map(|(id, values)| (id.to_string(), VectorRecord::new(id, values)))
        .collect();
        let ids: Vec<String> = ["b", "missing", "a", "b"].map(String::from).to_vec();

        let ordered: Vec<String> = in_request_order(&ids, &found)
            .into_iter()
            .map(|record| record.id)
            .collect();

        assert_eq!(ordered, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_point_id_is_deterministic_uuid() {
        let a = point_id("doc_0");
        assert_eq!(a, point_id("doc_0"));
        assert_ne!(a, point_id("doc_1"));

        let id = point_id_to_string(Some(&a));
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_distance_mapping() {
        assert_eq!(to_distance_metric(Distance::Dot), DistanceMetric::DotProduct);
        assert_eq!(to_distance_metric(Distance::Euclid), DistanceMetric::Euclidean);
        assert_eq!(to_distance_metric(Distance::Cosine), DistanceMetric::Cosine);
    }

    #[test]
    fn test_missing_config_reports_zero_dimensions() {
        assert_eq!(extract_config_params(None), (0, DistanceMetric::Cosine));
    }
}
