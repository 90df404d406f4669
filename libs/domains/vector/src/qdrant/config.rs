use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};

pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_COLLECTION: &str = "vectors";

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub collection: String,
}

impl QdrantConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

impl FromEnv for QdrantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let collection = env_or_default("QDRANT_COLLECTION", DEFAULT_COLLECTION);
        if collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "QDRANT_COLLECTION must not be empty".to_string(),
            ));
        }

        Ok(Self {
            url: env_or_default("QDRANT_URL", DEFAULT_QDRANT_URL),
            api_key: env_optional("QDRANT_API_KEY"),
            timeout_secs: env_parse_or("QDRANT_TIMEOUT_SECS", 30u64)?,
            collection,
        })
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_QDRANT_URL.to_string(),
            api_key: None,
            timeout_secs: 30,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "QDRANT_URL",
        "QDRANT_API_KEY",
        "QDRANT_TIMEOUT_SECS",
        "QDRANT_COLLECTION",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = QdrantConfig::from_env().unwrap();
            assert_eq!(config.url, DEFAULT_QDRANT_URL);
            assert_eq!(config.api_key, None);
            assert_eq!(config.timeout_secs, 30);
            assert_eq!(config.collection, "vectors");
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("QDRANT_URL", Some("http://qdrant:6334")),
                ("QDRANT_API_KEY", Some("secret")),
                ("QDRANT_TIMEOUT_SECS", Some("5")),
                ("QDRANT_COLLECTION", Some("docs")),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url, "http://qdrant:6334");
                assert_eq!(config.api_key.as_deref(), Some("secret"));
                assert_eq!(config.timeout_secs, 5);
                assert_eq!(config.collection, "docs");
            },
        );
    }

    #[test]
    fn test_invalid_timeout() {
        temp_env::with_var("QDRANT_TIMEOUT_SECS", Some("soon"), || {
            assert!(matches!(
                QdrantConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }

    #[test]
    fn test_builder() {
        let config = QdrantConfig::new("http://qdrant:6334".to_string())
            .with_api_key("secret".to_string())
            .with_timeout(5)
            .with_collection("docs");

        assert_eq!(config.url, "http://qdrant:6334");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.collection, "docs");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        temp_env::with_var("QDRANT_API_KEY", Some(""), || {
            assert_eq!(QdrantConfig::from_env().unwrap().api_key, None);
        });
    }
}
