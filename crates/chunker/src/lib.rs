//! # HR Chunker
//!
//! Deterministic sliding-window chunking for HR policy documents.
//!
//! ## Philosophy
//!
//! The chunker turns a policy document into overlapping fixed-size windows
//! that:
//! - Carry stable identifiers (`{source}::chunk_{NNNN}`) for citations
//! - Record their character span in the original text
//! - Overlap by a configurable amount so facts near window edges are not
//!   split away from their context
//! - Never mutate or re-read their inputs (pure over `Document`)
//!
//! ## Architecture
//!
//! ```text
//! Raw text
//!     │
//!     ├──> clean_text (newline + whitespace normalization)
//!     │
//!     └──> Chunker (validated window config)
//!          ├─> Slide [start, start + chunk_size) over the text
//!          ├─> Trim each window; drop blank windows
//!          ├─> Advance by chunk_size - chunk_overlap
//!          └─> Emit Chunk[] with span + provenance metadata
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hr_chunker::{Chunker, ChunkerConfig, Document};
//!
//! let chunker = Chunker::new(ChunkerConfig::new(200, 50)).unwrap();
//! let doc = Document::new(
//!     "pto_policy.md".to_string(),
//!     "Employees get 20 PTO days per year.".to_string(),
//!     serde_json::Map::new(),
//! );
//!
//! for chunk in chunker.chunk_document(&doc) {
//!     println!("{} [{}..{}]", chunk.id, chunk.start_char, chunk.end_char);
//! }
//! ```

mod chunker;
mod cleaner;
mod config;
mod error;
mod types;

pub use chunker::Chunker;
pub use cleaner::clean_text;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use types::{Chunk, Document};
