use datamarket_catalog::CatalogStore;
use datamarket_common::{AppConfig, Result};
use datamarket_llm::{LlmClient, OpenAiClient};
use datamarket_vector::{CandidateStore, JsonEmbeddingStore, SimilaritySearchEngine};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Catalog store
    pub catalog: Arc<RwLock<CatalogStore>>,

    /// Semantic search engine
    pub search: SimilaritySearchEngine,

    /// Chat/embedding provider client
    pub llm_client: Arc<dyn LlmClient>,
}

impl AppState {
    /// Create application state backed by the configured data directory
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::from_config(&config)?);
        let embeddings: Arc<dyn CandidateStore> =
            Arc::new(JsonEmbeddingStore::new(config.embeddings_path()));
        let catalog = CatalogStore::load(&config.catalog_path())?;

        Ok(Self::from_parts(config, catalog, embeddings, llm_client))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        config: AppConfig,
        catalog: CatalogStore,
        embeddings: Arc<dyn CandidateStore>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        let search = SimilaritySearchEngine::new(
            embeddings,
            llm_client.clone(),
            config.embedding_model.clone(),
            config.max_limit,
        );

        Self {
            config,
            catalog: Arc::new(RwLock::new(catalog)),
            search,
            llm_client,
        }
    }

    /// Count a data source view in the background
    ///
    /// Never blocks or fails the calling request; errors are only logged.
    pub fn record_view(&self, data_source_id: String) {
        let catalog = self.catalog.clone();
        tokio::spawn(async move {
            let mut store = catalog.write().await;
            if let Err(e) = store.increment_view_count(&data_source_id).await {
                warn!("Failed to record view for {}: {}", data_source_id, e);
            }
        });
    }
}
