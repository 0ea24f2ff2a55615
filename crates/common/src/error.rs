/// Datamarket error types
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// Permanent provider error (bad credentials, rejected request, malformed payload)
    #[error("LLM provider error: {0}")]
    Llm(String),

    /// Transient provider error (timeout, rate limit, upstream 5xx)
    #[error("LLM provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Vector search related error
    #[error("Vector search error: {0}")]
    VectorSearch(String),

    /// Catalog storage error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarketError {
    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create provider-unavailable error
    pub fn provider_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    /// Create vector search error
    pub fn vector_search<S: Into<String>>(msg: S) -> Self {
        Self::VectorSearch(msg.into())
    }

    /// Create catalog error
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether a retry with backoff may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}

impl MarketError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Llm(_) => 502,
            Self::ProviderUnavailable(_) => 503,
            Self::VectorSearch(_) => 500,
            Self::Catalog(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }

    /// Message that is safe to show to untrusted callers
    ///
    /// Input and lookup errors carry caller-supplied context and are echoed;
    /// everything else is reduced to a generic description.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::ProviderUnavailable(_) => "Model provider unavailable, try again later".to_string(),
            Self::Llm(_) => "Upstream model request failed".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MarketError::invalid_input("x").status_code(), 400);
        assert_eq!(MarketError::not_found("team").status_code(), 404);
        assert_eq!(MarketError::provider_unavailable("timeout").status_code(), 503);
        assert_eq!(MarketError::llm("401").status_code(), 502);
        assert_eq!(MarketError::catalog("disk").status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_internals() {
        let err = MarketError::llm("invalid api key sk-abc123");
        assert!(!err.public_message().contains("sk-abc123"));

        let err = MarketError::internal("/var/data/catalog.json: permission denied");
        assert_eq!(err.public_message(), "Internal server error");

        let err = MarketError::invalid_input("query cannot be empty");
        assert_eq!(err.public_message(), "query cannot be empty");
    }

    #[test]
    fn test_transient_classification() {
        assert!(MarketError::provider_unavailable("429").is_transient());
        assert!(!MarketError::llm("400").is_transient());
        assert!(!MarketError::invalid_input("bad").is_transient());
    }
}
