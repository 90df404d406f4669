use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::Serialize;
use tracing::instrument;

use super::EmbeddingProvider;
use super::openai::request_embedding;
use crate::error::VectorResult;

pub const DEFAULT_VOYAGE_BASE_URL: &str = "https://api.voyageai.com/v1";
pub const DEFAULT_VOYAGE_MODEL: &str = "voyage-law-2";

/// Voyage AI embedding provider configuration
#[derive(Debug, Clone)]
pub struct VoyageConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl VoyageConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_VOYAGE_BASE_URL.to_string(),
            model: DEFAULT_VOYAGE_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl FromEnv for VoyageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("VOYAGE_API_KEY")?,
            base_url: env_or_default("VOYAGE_BASE_URL", DEFAULT_VOYAGE_BASE_URL),
            model: env_or_default("VOYAGE_EMBEDDING_MODEL", DEFAULT_VOYAGE_MODEL),
        })
    }
}

/// Voyage AI embeddings provider. Questions are embedded with
/// `input_type = "query"`.
pub struct VoyageProvider {
    client: Client,
    config: VoyageConfig,
}

impl VoyageProvider {
    pub fn new(config: VoyageConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct VoyageRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    input_type: &'static str,
}

#[async_trait]
impl EmbeddingProvider for VoyageProvider {
    fn name(&self) -> &'static str {
        "voyage"
    }

    #[instrument(skip(self, text), fields(model = %self.config.model))]
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let request = VoyageRequest {
            model: &self.config.model,
            input: vec![text],
            input_type: "query",
        };

        request_embedding(
            &self.client,
            "Voyage",
            &self.config.base_url,
            &self.config.api_key,
            &request,
        )
        .await
    }
}
