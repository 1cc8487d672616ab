//! # HR Indexer
//!
//! Ingestion pipeline for the HR policy index.
//!
//! ## Pipeline
//!
//! ```text
//! Raw document directory
//!     │
//!     ├──> Loader (.md / .txt, sorted)
//!     │      └─> Documents
//!     │
//!     ├──> Chunker (overlapping windows)
//!     │      └─> Chunks
//!     │
//!     └──> IndexBuilder (batch embed, normalize)
//!            └─> index.json + chunks.jsonl + meta.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hr_chunker::{Chunker, ChunkerConfig};
//! use hr_indexer::{load_documents, IndexBuilder, DEFAULT_BATCH_SIZE};
//! use hr_providers::HashedEmbeddings;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> hr_indexer::Result<()> {
//!     let docs = load_documents(Path::new("data/hr_docs")).await?;
//!     let chunks = Chunker::new(ChunkerConfig::default())?.chunk_documents(&docs);
//!
//!     let builder = IndexBuilder::new(DEFAULT_BATCH_SIZE)?;
//!     let embeddings = HashedEmbeddings::new(384);
//!     let meta = builder
//!         .build(&chunks, &embeddings, Path::new("data/index"))
//!         .await?;
//!
//!     println!("Indexed {} chunks", meta.num_chunks);
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod loader;
mod stats;

pub use builder::{IndexBuilder, DEFAULT_BATCH_SIZE};
pub use error::{IndexerError, Result};
pub use loader::load_documents;
pub use stats::IngestStats;
