use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Metadata attached to a record: string keys to arbitrary JSON values.
pub type Metadata = Map<String, Value>;

/// Metadata key carrying the source document of a record.
pub const TEXT_KEY: &str = "text";

/// Default number of matches returned by a query.
pub const DEFAULT_TOP_K: usize = 10;

/// A stored vector with its identifier and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The source document, if one was stored.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get(TEXT_KEY).and_then(Value::as_str)
    }
}

/// Options for a similarity query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub top_k: usize,
    pub filter: Option<Value>,
    pub return_values: bool,
    pub return_metadata: bool,
}

impl QueryOptions {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_values(mut self, return_values: bool) -> Self {
        self.return_values = return_values;
        self
    }

    pub fn with_metadata(mut self, return_metadata: bool) -> Self {
        self.return_metadata = return_metadata;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            filter: None,
            return_values: false,
            return_metadata: true,
        }
    }
}

/// A single query hit, ordered by descending score within a [`QueryResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryMatch {
    pub id: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    pub count: usize,
    pub matches: Vec<QueryMatch>,
}

impl QueryResult {
    pub fn new(matches: Vec<QueryMatch>) -> Self {
        Self {
            count: matches.len(),
            matches,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Green,
    Yellow,
    Grey,
    Red,
}

/// Index-level summary returned by `describe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescription {
    pub name: String,
    pub dimensions: u64,
    pub vector_count: u64,
    pub metric: DistanceMetric,
    pub status: IndexStatus,
}

/// Acknowledgement of a write. Logged and counted, never echoed to clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mutation {
    pub count: usize,
    pub ids: Vec<String>,
}

impl Mutation {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            count: ids.len(),
            ids,
        }
    }
}

/// One sampled point handed to the visualization page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisualPoint {
    pub id: String,
    pub embedding: Vec<f32>,
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

impl From<QueryMatch> for VisualPoint {
    fn from(m: QueryMatch) -> Self {
        Self {
            id: m.id,
            embedding: m.values.unwrap_or_default(),
            metadata: m.metadata.unwrap_or_default(),
        }
    }
}
