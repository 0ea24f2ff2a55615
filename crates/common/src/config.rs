use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides (`DATAMARKET_SERVER_PORT`, ...)
pub const ENV_PREFIX: &str = "DATAMARKET";

/// Optional config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "datamarket";

/// Datamarket application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding catalog.json and embeddings.json
    pub data_dir: PathBuf,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// OpenAI-compatible API base URL
    pub provider_base_url: String,

    /// Provider API key
    pub api_key: Option<String>,

    /// Embedding model name
    pub embedding_model: String,

    /// Chat completion model name
    pub chat_model: String,

    /// Per-request timeout for provider calls
    pub request_timeout_secs: u64,

    /// Attempts for transient provider failures
    pub max_retries: u32,

    /// Search result count when the caller gives none
    pub default_limit: usize,

    /// Hard cap on search result count
    pub max_limit: usize,

    /// Similarity threshold when the caller gives none
    pub default_threshold: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./data/log"),
            log_level: "info".to_string(),
            provider_base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 30,
            max_retries: 3,
            default_limit: 10,
            max_limit: 100,
            default_threshold: 0.7,
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// Layers, lowest precedence first: built-in defaults, `datamarket.toml`
    /// (optional), `DATAMARKET_*` environment variables. `.env` is read into
    /// the environment before anything else.
    pub fn load() -> Result<Self, MarketError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| MarketError::config(format!("Failed to encode defaults: {}", e)))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| MarketError::config(format!("Failed to read configuration: {}", e)))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| MarketError::config(format!("Invalid configuration: {}", e)))?;

        if config.api_key.as_deref().map_or(true, str::is_empty) {
            config.api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        }

        config.validate()?;
        config.ensure_directories()?;

        Ok(config)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), MarketError> {
        for dir in [&self.data_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    MarketError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Path of the catalog document
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("catalog.json")
    }

    /// Path of the stored embeddings table
    pub fn embeddings_path(&self) -> PathBuf {
        self.data_dir.join("embeddings.json")
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Copy of the config with secrets blanked out, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("***".to_string());
        }
        copy
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.embedding_model.is_empty() {
            return Err(MarketError::config("Embedding model name cannot be empty"));
        }

        if self.chat_model.is_empty() {
            return Err(MarketError::config("Chat model name cannot be empty"));
        }

        if !self.provider_base_url.starts_with("http://")
            && !self.provider_base_url.starts_with("https://")
        {
            return Err(MarketError::config(
                "Provider base URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(MarketError::config("Server port cannot be 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(MarketError::config("Request timeout must be at least 1 second"));
        }

        if self.max_limit == 0 || self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(MarketError::config(
                "default_limit must be between 1 and max_limit",
            ));
        }

        if !(-1.0..=1.0).contains(&self.default_threshold) {
            return Err(MarketError::config(
                "default_threshold must be within [-1, 1]",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 100);
        assert!((config.default_threshold - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_data_paths() {
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/market"),
            ..AppConfig::default()
        };
        assert_eq!(config.catalog_path(), PathBuf::from("/srv/market/catalog.json"));
        assert_eq!(config.embeddings_path(), PathBuf::from("/srv/market/embeddings.json"));
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid = AppConfig::default();
        invalid.embedding_model = String::new();
        assert!(invalid.validate().is_err());

        let mut invalid = AppConfig::default();
        invalid.provider_base_url = "ftp://models".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = AppConfig::default();
        invalid.default_threshold = 1.5;
        assert!(invalid.validate().is_err());

        let mut invalid = AppConfig::default();
        invalid.default_limit = 500;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.redacted().api_key.as_deref(), Some("***"));
        assert_eq!(AppConfig::default().redacted().api_key, None);
    }

    #[test]
    fn test_ensure_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().join("data"),
            log_dir: tmp.path().join("data/log"),
            ..AppConfig::default()
        };
        config.ensure_directories().unwrap();
        assert!(config.data_dir.is_dir());
        assert!(config.log_dir.is_dir());
    }
}
