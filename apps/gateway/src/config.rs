//! Configuration for the vector gateway

use std::path::PathBuf;

use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_optional, env_parse_or, server::ServerConfig,
};
use domain_vector::QdrantConfig;
use domain_vector::service::DEFAULT_DIMENSIONS;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub qdrant: QdrantConfig,
    /// Dimensionality used to probe the index when it does not report one.
    pub dimensions: usize,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
    /// Replacement for the built-in visualization page.
    pub template_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let dimensions = env_parse_or("VECTOR_DIMENSIONS", DEFAULT_DIMENSIONS)?;
        if dimensions == 0 {
            return Err(ConfigError::Invalid(
                "VECTOR_DIMENSIONS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            qdrant: QdrantConfig::from_env()?,
            dimensions,
            cors_origins: parse_origins(env_optional("CORS_ALLOWED_ORIGIN").as_deref()),
            template_path: env_optional("VISUALIZATION_TEMPLATE_PATH").map(PathBuf::from),
        })
    }
}

fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
