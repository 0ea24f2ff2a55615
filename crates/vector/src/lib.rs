//! Datamarket similarity search
//!
//! Query embedding, cosine ranking over the stored embeddings table

mod engine;
mod similarity;
mod store;
mod types;

pub use engine::{rank_candidates, SimilaritySearchEngine};
pub use similarity::{cosine_similarity, parse_vector, VectorError};
pub use store::{CandidateStore, JsonEmbeddingStore, MemoryEmbeddingStore};
pub use types::{EmbeddingRecord, SearchOptions, SearchOutcome, SearchResult, SearchStats};
