use std::sync::Arc;

use anyhow::{Context, Result};
use hr_answerer::{AnswerResult, Answerer};
use hr_providers::{ChatClient, EmbeddingClient};
use hr_retrieval::{RetrievalResult, Retriever};
use hr_vector_store::VectorStore;

use crate::settings::Settings;

/// Retrieval plus grounded answering behind one `ask` call.
///
/// Owns the loaded store for the whole session; every question is an
/// independent retrieve-then-answer round trip.
pub struct HrAgent {
    retriever: Retriever,
    answerer: Answerer,
    top_k: usize,
    strict_grounded: bool,
}

/// Everything produced for one question
pub struct AskOutcome {
    pub retrieval: RetrievalResult,
    pub answer: AnswerResult,
}

impl HrAgent {
    pub fn new(
        store: VectorStore,
        embeddings: Arc<dyn EmbeddingClient>,
        chat: Arc<dyn ChatClient>,
        settings: &Settings,
    ) -> Result<Self> {
        let retriever = Retriever::new(store, embeddings);
        let answerer = Answerer::new(chat, settings.max_context_chars, settings.temperature)?;
        Ok(Self {
            retriever,
            answerer,
            top_k: settings.top_k,
            strict_grounded: settings.strict_grounded,
        })
    }

    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let store = load_store(settings).await?;
        Self::new(
            store,
            settings.embedding_client()?,
            settings.chat_client()?,
            settings,
        )
    }

    pub async fn ask(&self, question: &str) -> Result<AskOutcome> {
        let retrieval = self.retriever.retrieve(question, self.top_k).await?;

        let answer = if self.strict_grounded {
            self.answerer
                .answer_grounded(&retrieval.query, &retrieval.results)
                .await?
        } else {
            self.answerer
                .answer(&retrieval.query, &retrieval.results)
                .await?
        };

        Ok(AskOutcome { retrieval, answer })
    }
}

/// Load the persisted index named by the settings.
pub async fn load_store(settings: &Settings) -> Result<VectorStore> {
    VectorStore::load(&settings.index_dir).await.with_context(|| {
        format!(
            "Failed to load the index from {}; run `hr-rag ingest` first",
            settings.index_dir.display()
        )
    })
}
