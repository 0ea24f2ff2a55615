use datamarket_common::{MarketError, Result};
use datamarket_llm::LlmClient;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::similarity::{cosine_similarity, parse_vector, VectorError};
use crate::store::CandidateStore;
use crate::types::{EmbeddingRecord, SearchOptions, SearchOutcome, SearchResult, SearchStats};

/// Brute-force semantic search over the stored embeddings table
pub struct SimilaritySearchEngine {
    store: Arc<dyn CandidateStore>,
    llm_client: Arc<dyn LlmClient>,
    embedding_model: String,
    max_limit: usize,
}

impl SimilaritySearchEngine {
    /// Create new search engine
    pub fn new(
        store: Arc<dyn CandidateStore>,
        llm_client: Arc<dyn LlmClient>,
        embedding_model: impl Into<String>,
        max_limit: usize,
    ) -> Self {
        let embedding_model = embedding_model.into();
        info!(
            "Similarity search engine initialized - model={}, max_limit={}",
            embedding_model, max_limit
        );

        Self {
            store,
            llm_client,
            embedding_model,
            max_limit: max_limit.max(1),
        }
    }

    /// Rank stored content by similarity to `query`
    ///
    /// Input is validated before any external call. The query embedding and
    /// the candidate fetch are independent and run concurrently.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MarketError::invalid_input("Query cannot be empty"));
        }
        if options.limit == 0 {
            return Err(MarketError::invalid_input("Limit must be at least 1"));
        }
        if !options.threshold.is_finite() || !(-1.0..=1.0).contains(&options.threshold) {
            return Err(MarketError::invalid_input("Threshold must be between -1 and 1"));
        }

        let limit = options.limit.min(self.max_limit);
        let content_types = options
            .content_types
            .as_deref()
            .filter(|types| !types.is_empty());

        debug!(
            "Searching for: {} (limit={}, threshold={}, content_types={:?})",
            query, limit, options.threshold, content_types
        );

        let (query_embedding, candidates) = tokio::try_join!(
            self.llm_client.embed(&self.embedding_model, query),
            self.store.fetch_embeddings(content_types),
        )?;

        if candidates.is_empty() {
            let message = match content_types {
                Some(types) => format!("No embeddings stored for content types: {}", types.join(", ")),
                None => "No embeddings stored yet. Run the embedding ingestion first.".to_string(),
            };
            info!("Search completed - empty candidate pool");
            return Ok(SearchOutcome::empty(message));
        }

        let total_candidates = candidates.len();
        let results = rank_candidates(&query_embedding, candidates, options.threshold, limit);

        info!(
            "Search completed - {} results (from {} candidates)",
            results.len(),
            total_candidates
        );

        if results.is_empty() {
            return Ok(SearchOutcome::empty(format!(
                "No results met the similarity threshold of {}",
                options.threshold
            )));
        }

        Ok(SearchOutcome::found(results))
    }

    /// Get embedding table statistics
    pub async fn stats(&self) -> Result<SearchStats> {
        let records = self.store.fetch_embeddings(None).await?;

        let mut by_content_type = BTreeMap::new();
        for record in &records {
            *by_content_type.entry(record.content_type.clone()).or_insert(0) += 1;
        }

        Ok(SearchStats {
            total_embeddings: records.len(),
            by_content_type,
            embedding_model: self.embedding_model.clone(),
        })
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }
}

/// Score, filter, sort and truncate candidates
///
/// Candidates whose vector is malformed, of the wrong length or zero-norm
/// are skipped. Output is ordered by similarity descending, then `id`
/// ascending.
pub fn rank_candidates(
    query_embedding: &[f32],
    candidates: Vec<EmbeddingRecord>,
    threshold: f32,
    limit: usize,
) -> Vec<SearchResult> {
    let mut results = Vec::new();
    let mut skipped = 0usize;

    for mut record in candidates {
        let embedding = std::mem::take(&mut record.embedding);

        let score = parse_vector(&embedding).and_then(|v| cosine_similarity(query_embedding, &v));
        let similarity = match score {
            Ok(similarity) => similarity,
            Err(e @ VectorError::Malformed(_)) => {
                warn!("Skipping embedding {} ({}): {}", record.id, record.content_type, e);
                skipped += 1;
                continue;
            }
            Err(e) => {
                debug!("Skipping embedding {} ({}): {}", record.id, record.content_type, e);
                skipped += 1;
                continue;
            }
        };

        if similarity >= threshold {
            results.push(SearchResult::new(record, similarity));
        }
    }

    if skipped > 0 {
        info!("{} candidates skipped due to unusable vectors", skipped);
    }

    results.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.id.cmp(&b.id))
    });
    results.truncate(limit);
    results
}
