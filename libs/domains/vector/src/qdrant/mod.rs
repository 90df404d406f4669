mod client;
mod config;
pub mod filter;
pub mod payload;

pub use client::{QdrantIndex, point_id};
pub use config::{DEFAULT_COLLECTION, DEFAULT_QDRANT_URL, QdrantConfig};
