//! Vector Gateway
//!
//! HTTP gateway exposing CRUD, similarity search and a visualization page
//! over a Qdrant collection.
//!
//! ## Architecture
//!
//! ```text
//! Client (Python / curl / browser)
//!   ↓ JSON over HTTP
//! axum router (domain_vector::handlers)
//!   ↓ payload adaptation
//! VectorService
//!   ↓
//! ┌─────────────┬───────────────────┐
//! │ QdrantIndex │ EmbeddingProvider │
//! └─────────────┴───────────────────┘
//!   ↓                  ↓
//! Qdrant        OpenAI / Voyage API
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `server`: router assembly and server lifecycle

pub mod config;
pub mod server;

pub use config::Config;
pub use server::{build_router, run};
