use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hr_chunker::Chunk;

use crate::error::Result;

/// Metadata persisted alongside the vector index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexMeta {
    /// Embedding model that produced the vectors
    pub embedding_model: String,

    /// Vector dimension
    pub dimension: usize,

    /// Number of indexed chunks
    pub num_chunks: usize,

    /// Index structure identifier
    pub index_kind: String,

    /// Similarity convention of search scores
    pub similarity: String,
}

impl IndexMeta {
    /// Metadata for a flat inner-product index
    #[must_use]
    pub fn flat_ip(
        embedding_model: impl Into<String>,
        dimension: usize,
        num_chunks: usize,
    ) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            dimension,
            num_chunks,
            index_kind: "flat_ip".to_string(),
            similarity: "cosine (via normalized vectors + inner product)".to_string(),
        }
    }

    /// Persist as pretty JSON via a temp file and rename
    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Load metadata produced by [`IndexMeta::save`]
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let meta: Self = serde_json::from_slice(&bytes)?;
        Ok(meta)
    }
}

/// One persisted chunk row.
///
/// Line `row` of the chunk store pairs with vector `row` of the index; the
/// explicit field lets load verify the pairing instead of trusting file
/// order alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkRecord {
    /// Position of this record, equal to its 0-based line number
    pub row: usize,

    /// Chunk identifier, `{source}::chunk_{NNNN}`
    pub id: String,

    /// Source document identifier
    pub source: String,

    /// Window ordinal within the source document
    pub chunk_index: usize,

    /// Window start offset in characters
    pub start_char: usize,

    /// Window end offset (exclusive) in characters
    pub end_char: usize,

    /// Trimmed chunk text
    pub text: String,

    /// Chunk metadata
    pub metadata: Map<String, Value>,
}

impl ChunkRecord {
    /// Record for `chunk` stored at `row`
    #[must_use]
    pub fn from_chunk(row: usize, chunk: &Chunk) -> Self {
        Self {
            row,
            id: chunk.id.clone(),
            source: chunk.source.clone(),
            chunk_index: chunk.chunk_index,
            start_char: chunk.start_char,
            end_char: chunk.end_char,
            text: chunk.text.clone(),
            metadata: chunk.metadata.clone(),
        }
    }

    /// Rebuild the in-memory chunk
    #[must_use]
    pub fn into_chunk(self) -> Chunk {
        Chunk::new(
            self.id,
            self.text,
            self.source,
            self.chunk_index,
            self.start_char,
            self.end_char,
            self.metadata,
        )
    }
}

/// A chunk returned by similarity search
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    /// The stored chunk
    pub chunk: Chunk,

    /// Cosine similarity to the query, in [-1, 1], higher is better
    pub score: f32,
}
