//! # HR Answerer
//!
//! Grounded answer generation over retrieved HR policy chunks.
//!
//! ```text
//! Ranked hits ──> build_context (char budget, citation headers)
//!                      │
//!                      └──> prompt ──> ChatClient ──> AnswerResult
//! ```
//!
//! Answers are constrained to the assembled context; when the context cannot
//! support one, the model is instructed to reply with the fixed [`REFUSAL`]
//! sentence. With strict grounding enabled, zero retrieved chunks skip the
//! chat call entirely and refuse deterministically.

mod answerer;
mod citations;
mod context;
mod error;
mod prompts;

pub use answerer::{AnswerResult, Answerer, REFUSAL};
pub use citations::{format_sources_block, unique_sources, MAX_SOURCES};
pub use context::build_context;
pub use error::{AnswererError, Result};
pub use prompts::{hr_user_prompt, HR_SYSTEM_PROMPT};
