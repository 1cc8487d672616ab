use std::path::Path;

use hr_chunker::Chunk;

use crate::error::{Result, VectorStoreError};
use crate::flat_index::FlatIpIndex;
use crate::types::{ChunkRecord, IndexMeta, RetrievedChunk};

/// File name of the vector index artifact
pub const INDEX_FILE: &str = "index.json";

/// File name of the row-ordered chunk store artifact
pub const CHUNKS_FILE: &str = "chunks.jsonl";

/// File name of the metadata artifact
pub const META_FILE: &str = "meta.json";

/// Read-only view over a persisted index directory.
///
/// Row `i` of the chunk store and vector `i` of the index refer to the
/// same logical chunk; construction fails if the artifacts disagree.
pub struct VectorStore {
    index: FlatIpIndex,
    chunks: Vec<Chunk>,
    meta: IndexMeta,
}

impl VectorStore {
    /// Assemble a store from parts, validating that rows and vectors pair up
    pub fn new(index: FlatIpIndex, chunks: Vec<Chunk>, meta: IndexMeta) -> Result<Self> {
        if index.len() != chunks.len() {
            return Err(VectorStoreError::inconsistent(format!(
                "index holds {} vectors but chunk store has {} rows",
                index.len(),
                chunks.len()
            )));
        }

        Ok(Self {
            index,
            chunks,
            meta,
        })
    }

    /// Load the three artifacts from `index_dir`.
    ///
    /// Fails when any artifact is missing or when the trio is internally
    /// inconsistent (vector count, row count, metadata counts, dimension).
    pub async fn load(index_dir: &Path) -> Result<Self> {
        let index_path = index_dir.join(INDEX_FILE);
        let chunks_path = index_dir.join(CHUNKS_FILE);
        let meta_path = index_dir.join(META_FILE);

        for path in [&index_path, &chunks_path, &meta_path] {
            if !path.exists() {
                return Err(VectorStoreError::MissingArtifact(path.clone()));
            }
        }

        let index = FlatIpIndex::load(&index_path).await?;
        let chunks = load_chunk_records(&chunks_path).await?;
        let meta = IndexMeta::load(&meta_path).await?;

        if index.len() != chunks.len() {
            return Err(VectorStoreError::inconsistent(format!(
                "index holds {} vectors but chunk store has {} rows",
                index.len(),
                chunks.len()
            )));
        }

        if meta.num_chunks != chunks.len() {
            return Err(VectorStoreError::inconsistent(format!(
                "meta records {} chunks but chunk store has {} rows",
                meta.num_chunks,
                chunks.len()
            )));
        }

        if meta.dimension != index.dimension() {
            return Err(VectorStoreError::inconsistent(format!(
                "meta records dimension {} but index uses {}",
                meta.dimension,
                index.dimension()
            )));
        }

        log::info!(
            "Loaded vector store from {}: {} chunks, dimension {}",
            index_dir.display(),
            chunks.len(),
            index.dimension()
        );

        Ok(Self {
            index,
            chunks,
            meta,
        })
    }

    /// Similarity search returning chunks with cosine scores, best first.
    /// An empty store yields empty results for any valid `top_k`.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let matches = self.index.search(query, top_k)?;

        log::debug!("Search returned {} of {} rows", matches.len(), self.len());

        matches
            .into_iter()
            .map(|(row, score)| {
                self.chunks
                    .get(row)
                    .cloned()
                    .map(|chunk| RetrievedChunk { chunk, score })
                    .ok_or_else(|| {
                        VectorStoreError::inconsistent(format!(
                            "search returned row {row} beyond chunk store"
                        ))
                    })
            })
            .collect()
    }

    /// Number of stored chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check whether the store holds no chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Vector dimension of the index
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// Index metadata
    #[must_use]
    pub const fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    /// Stored chunks in row order
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

/// Write chunk rows as JSON Lines via a temp file and rename
pub async fn save_chunk_records(path: &Path, chunks: &[Chunk]) -> Result<()> {
    let mut out = String::new();
    for (row, chunk) in chunks.iter().enumerate() {
        let record = ChunkRecord::from_chunk(row, chunk);
        out.push_str(&serde_json::to_string(&record)?);
        out.push('\n');
    }

    let tmp = path.with_extension("jsonl.tmp");
    tokio::fs::write(&tmp, out).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Read chunk rows, verifying each record's `row` field matches its
/// position in the file
pub async fn load_chunk_records(path: &Path) -> Result<Vec<Chunk>> {
    let raw = tokio::fs::read_to_string(path).await?;

    let mut chunks = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let record: ChunkRecord = serde_json::from_str(line)?;
        if record.row != line_no {
            return Err(VectorStoreError::inconsistent(format!(
                "chunk store line {} carries row index {}",
                line_no, record.row
            )));
        }
        chunks.push(record.into_chunk());
    }

    Ok(chunks)
}
