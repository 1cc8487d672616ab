//! # HR Retrieval
//!
//! Query-time similarity search over the persisted HR policy index.
//!
//! ```text
//! Question ──> embed ──> FlatIpIndex search ──> ranked RetrievedChunks
//! ```
//!
//! The store is loaded once and treated as read-only; every retrieval is
//! independent of the previous one.

mod error;
mod retriever;

pub use error::{Result, RetrievalError};
pub use retriever::{RetrievalResult, Retriever};
