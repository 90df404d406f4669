//! Vector Domain Library
//!
//! HTTP translation layer in front of a vector index: loosely typed JSON
//! batches in, native index records out, and index results back as JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    handlers     │  ← axum routes, {"error": ...} envelope
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │  VectorService  │────►│ EmbeddingProvider│  (chat only)
//! │  + adapter      │     │  OpenAI / Voyage │
//! └────────┬────────┘     └──────────────────┘
//!          │
//! ┌────────▼────────┐
//! │   VectorIndex   │
//! │    (trait)      │
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │   QdrantIndex   │
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vector::{ApiState, QdrantConfig, QdrantIndex, VectorService, VisualizationTemplate};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = QdrantIndex::new(QdrantConfig::from_env()?)?;
//! let service = VectorService::new(index);
//! let state = ApiState::new(service, VisualizationTemplate::embedded()?);
//! let router = domain_vector::handlers::router(state);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod index;
pub mod models;
pub mod qdrant;
pub mod service;
pub mod template;

// Re-export commonly used types
pub use adapter::{InsertVectors, UpdateVectors};
pub use embedding::{EmbeddingProvider, OpenAIProvider, VoyageProvider};
pub use error::{VectorError, VectorResult};
pub use handlers::{ApiState, VectorApiDoc};
pub use index::VectorIndex;
pub use models::{
    DistanceMetric, IndexDescription, IndexStatus, Metadata, Mutation, QueryMatch, QueryOptions,
    QueryResult, VectorRecord, VisualPoint,
};
pub use qdrant::{QdrantConfig, QdrantIndex};
pub use service::VectorService;
pub use template::VisualizationTemplate;
