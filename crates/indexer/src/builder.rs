use std::path::{Path, PathBuf};
use std::time::SystemTime;

use hr_chunker::Chunk;
use hr_providers::{EmbeddingClient, ProviderError};
use hr_vector_store::{
    save_chunk_records, FlatIpIndex, IndexMeta, CHUNKS_FILE, INDEX_FILE, META_FILE,
};

use crate::error::{IndexerError, Result};

/// Default number of chunk texts sent to the embedding backend per request.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Builds the three persisted index artifacts from a full chunk set.
///
/// Embedding happens in order-preserving batches so vector `i` always
/// corresponds to `chunks[i]`. Artifacts are staged under a transaction
/// directory and renamed into place at the end; an error anywhere before the
/// commit leaves the index directory untouched.
pub struct IndexBuilder {
    batch_size: usize,
}

impl IndexBuilder {
    /// Create a builder with the given embedding batch size.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(IndexerError::Other("batch_size must be > 0".to_string()));
        }
        Ok(Self { batch_size })
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Embed `chunks` and persist index, chunk store and metadata into
    /// `index_dir`, replacing any previous artifacts.
    pub async fn build(
        &self,
        chunks: &[Chunk],
        embeddings: &dyn EmbeddingClient,
        index_dir: &Path,
    ) -> Result<IndexMeta> {
        if chunks.is_empty() {
            return Err(IndexerError::empty_input(
                "no chunks to index; check the raw document directory",
            ));
        }

        // 1. Embed chunk texts in order-preserving batches.
        let vectors = self.embed_chunks(chunks, embeddings).await?;

        // 2. Size the index from the first vector. Inserts L2-normalize, so
        //    inner-product search scores are cosine similarities.
        let Some(first) = vectors.first() else {
            return Err(IndexerError::Other(
                "embedding backend returned no vectors".to_string(),
            ));
        };
        let dimension = first.len();
        let mut index = FlatIpIndex::new(dimension);
        for vector in vectors {
            index.add(vector)?;
        }

        // 3. Stage all three artifacts under a unique transaction directory.
        //    Nothing in `index_dir` is touched until the full trio is staged.
        let staging_id = format!(
            "tx-{}-{}",
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or(u64::MAX),
            std::process::id()
        );
        let staging_dir = index_dir.join(".staging").join(staging_id);
        tokio::fs::create_dir_all(&staging_dir).await?;
        let _staging_cleanup = StagingCleanup::new(staging_dir.clone());

        index.save(&staging_dir.join(INDEX_FILE)).await?;
        save_chunk_records(&staging_dir.join(CHUNKS_FILE), chunks).await?;

        let meta = IndexMeta::flat_ip(embeddings.model_id(), dimension, chunks.len());
        meta.save(&staging_dir.join(META_FILE)).await?;

        // 4. Commit by renaming each staged artifact into place. A torn
        //    commit is caught by the consistency checks on load.
        for file_name in [INDEX_FILE, CHUNKS_FILE, META_FILE] {
            let src = staging_dir.join(file_name);
            let dst = index_dir.join(file_name);
            tokio::fs::rename(&src, &dst).await?;
        }

        log::info!(
            "Indexed {} chunks (dimension {}, model {}) into {}",
            chunks.len(),
            dimension,
            embeddings.model_id(),
            index_dir.display()
        );

        Ok(meta)
    }

    async fn embed_chunks(
        &self,
        chunks: &[Chunk],
        embeddings: &dyn EmbeddingClient,
    ) -> Result<Vec<Vec<f32>>> {
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();

        let mut vectors = Vec::with_capacity(texts.len());
        for (batch_no, batch) in texts.chunks(self.batch_size).enumerate() {
            log::debug!(
                "Embedding batch {} ({} texts, model {})",
                batch_no,
                batch.len(),
                embeddings.model_id()
            );
            let mut batch_vectors = embeddings.embed_batch(batch).await?;

            // A silent length mismatch would misalign chunks and vectors for
            // every row after this batch, so fail loudly here.
            if batch_vectors.len() != batch.len() {
                return Err(ProviderError::BatchMismatch {
                    expected: batch.len(),
                    actual: batch_vectors.len(),
                }
                .into());
            }
            vectors.append(&mut batch_vectors);
        }

        Ok(vectors)
    }
}

struct StagingCleanup {
    path: Option<PathBuf>,
}

impl StagingCleanup {
    fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl Drop for StagingCleanup {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        // Best-effort removal so staging directories do not pile up after
        // failed runs. Async when a runtime is available, sync otherwise.
        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::spawn(async move {
                let _ = tokio::fs::remove_dir_all(&path).await;
            });
        } else {
            let _ = std::fs::remove_dir_all(&path);
        }
    }
}
