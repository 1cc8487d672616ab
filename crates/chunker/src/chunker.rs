use serde_json::json;

use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::{Chunk, Document};

/// Sliding-window chunker over document text
#[derive(Debug)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker, rejecting invalid window configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// The validated window configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split one document into overlapping windows.
    ///
    /// Offsets are measured in characters, not bytes. Every window consumes
    /// an ordinal even when its trimmed text is empty and no chunk is
    /// emitted, so `chunk_index` values are strictly increasing but may
    /// have gaps. Empty text yields zero chunks. Pure over its inputs.
    pub fn chunk_document(&self, doc: &Document) -> Vec<Chunk> {
        let chars: Vec<char> = doc.text.chars().collect();
        let total = chars.len();

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut ordinal = 0;

        while start < total {
            let end = (start + self.config.chunk_size).min(total);
            let window: String = chars[start..end].iter().collect();
            let trimmed = window.trim();

            if !trimmed.is_empty() {
                let mut metadata = doc.metadata.clone();
                metadata.insert("chunk_index".to_string(), json!(ordinal));
                metadata.insert("start_char".to_string(), json!(start));
                metadata.insert("end_char".to_string(), json!(end));

                chunks.push(Chunk::new(
                    Chunk::id_for(&doc.source, ordinal),
                    trimmed.to_string(),
                    doc.source.clone(),
                    ordinal,
                    start,
                    end,
                    metadata,
                ));
            }

            ordinal += 1;

            if end >= total {
                break;
            }

            // Overlap the next window; jump past it if the pointer would
            // stall on pathological remaining text.
            let next_start = end - self.config.chunk_overlap;
            start = if next_start <= start { end } else { next_start };
        }

        chunks
    }

    /// Chunk a batch of documents, concatenating per-document output in
    /// document order.
    pub fn chunk_documents(&self, docs: &[Document]) -> Vec<Chunk> {
        let mut all = Vec::new();
        for doc in docs {
            all.extend(self.chunk_document(doc));
        }
        log::debug!("Chunked {} documents into {} chunks", docs.len(), all.len());
        all
    }
}
