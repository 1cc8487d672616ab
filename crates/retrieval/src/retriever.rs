use std::sync::Arc;

use hr_providers::EmbeddingClient;
use hr_vector_store::{RetrievedChunk, VectorStore};

use crate::error::{Result, RetrievalError};

/// Ranked output of a single retrieval request
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    /// The trimmed query that was embedded
    pub query: String,

    /// Requested result count
    pub top_k: usize,

    /// Hits in descending score order
    pub results: Vec<RetrievedChunk>,
}

/// Embeds a question and ranks stored chunks by cosine similarity
pub struct Retriever {
    store: VectorStore,
    embeddings: Arc<dyn EmbeddingClient>,
}

impl Retriever {
    pub fn new(store: VectorStore, embeddings: Arc<dyn EmbeddingClient>) -> Self {
        Self { store, embeddings }
    }

    /// Read-only view of the underlying store
    #[must_use]
    pub const fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Embed `query` and return the `top_k` most similar chunks.
    ///
    /// The query is trimmed before embedding; a whitespace-only query is an
    /// error. An index with no stored vectors yields an empty result list
    /// rather than an error.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievalResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        log::debug!(
            "Retrieving top {top_k} chunks for query '{query}' (model {})",
            self.embeddings.model_id()
        );

        let vector = self.embeddings.embed(query).await?;
        if vector.len() != self.store.dimension() {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.store.dimension(),
                actual: vector.len(),
            });
        }

        let results = self.store.search(&vector, top_k)?;
        log::debug!("Retrieved {} chunks", results.len());

        Ok(RetrievalResult {
            query: query.to_string(),
            top_k,
            results,
        })
    }
}
