mod openai;
mod provider;
mod voyage;

use std::str::FromStr;
use std::sync::Arc;

use core_config::{ConfigError, FromEnv, env_optional};

pub use openai::{OpenAIConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;
#[cfg(test)]
pub use provider::MockEmbeddingProvider;
pub use voyage::{VoyageConfig, VoyageProvider};

/// Which remote model serves embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    OpenAI,
    Voyage,
}

impl FromStr for EmbeddingProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "voyage" | "voyageai" => Ok(Self::Voyage),
            other => Err(ConfigError::ParseError {
                key: "EMBEDDING_PROVIDER".to_string(),
                details: format!("unknown provider '{}' (expected openai or voyage)", other),
            }),
        }
    }
}

/// Builds the provider named by `EMBEDDING_PROVIDER`, or `None` when unset.
pub fn provider_from_env() -> Result<Option<Arc<dyn EmbeddingProvider>>, ConfigError> {
    let Some(raw) = env_optional("EMBEDDING_PROVIDER") else {
        return Ok(None);
    };

    let provider: Arc<dyn EmbeddingProvider> = match raw.parse::<EmbeddingProviderKind>()? {
        EmbeddingProviderKind::OpenAI => Arc::new(OpenAIProvider::new(OpenAIConfig::from_env()?)),
        EmbeddingProviderKind::Voyage => Arc::new(VoyageProvider::new(VoyageConfig::from_env()?)),
    };

    Ok(Some(provider))
}
