//! # HR Vector Store
//!
//! Persisted similarity index over embedded policy chunks.
//!
//! ## Architecture
//!
//! ```text
//! Index directory
//!     ├── index.json    FlatIpIndex: L2-normalized vectors, exact
//!     │                 inner-product search (= cosine similarity)
//!     ├── chunks.jsonl  one ChunkRecord per line; line i pairs with
//!     │                 vector i and says so via its `row` field
//!     └── meta.json     IndexMeta: model id, dimension, chunk count,
//!                       similarity convention
//! ```
//!
//! All three artifacts are required together. [`VectorStore::load`] refuses
//! a directory where any artifact is missing, where vector and row counts
//! disagree, or where a record's `row` field does not match its position.
//! After a successful load the store is read-only; concurrent readers are
//! safe.
//!
//! ## Example
//!
//! ```rust
//! use hr_vector_store::FlatIpIndex;
//!
//! let mut index = FlatIpIndex::new(3);
//! index.add(vec![1.0, 0.0, 0.0]).unwrap();
//! index.add(vec![0.0, 1.0, 0.0]).unwrap();
//!
//! let hits = index.search(&[1.0, 0.0, 0.0], 1).unwrap();
//! assert_eq!(hits[0].0, 0);
//! assert!((hits[0].1 - 1.0).abs() < 1e-6);
//! ```

mod error;
mod flat_index;
mod store;
mod types;

pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIpIndex;
pub use store::{
    load_chunk_records, save_chunk_records, VectorStore, CHUNKS_FILE, INDEX_FILE, META_FILE,
};
pub use types::{ChunkRecord, IndexMeta, RetrievedChunk};
