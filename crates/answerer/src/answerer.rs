use std::sync::Arc;

use hr_providers::ChatClient;
use hr_vector_store::RetrievedChunk;

use crate::context::build_context;
use crate::error::{AnswererError, Result};
use crate::prompts::{hr_user_prompt, HR_SYSTEM_PROMPT};

/// Literal refusal sentence returned when the context cannot support an
/// answer. The system prompt mandates this exact wording.
pub const REFUSAL: &str = "I don't know based on the provided HR documents.";

/// Outcome of a single grounded answer request
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    /// The trimmed question that was answered
    pub question: String,

    /// Generated answer text, trimmed
    pub answer: String,

    /// Characters of assembled context sent to the model
    pub used_context_chars: usize,

    /// Chat model identifier
    pub model: String,
}

/// Generates grounded answers from retrieved context
pub struct Answerer {
    chat: Arc<dyn ChatClient>,
    max_context_chars: usize,
    temperature: f32,
}

impl Answerer {
    pub fn new(
        chat: Arc<dyn ChatClient>,
        max_context_chars: usize,
        temperature: f32,
    ) -> Result<Self> {
        if max_context_chars == 0 {
            return Err(AnswererError::invalid_config(
                "max_context_chars must be > 0",
            ));
        }
        Ok(Self {
            chat,
            max_context_chars,
            temperature,
        })
    }

    /// Answer `question` from the given ranked hits via the chat backend.
    pub async fn answer(&self, question: &str, hits: &[RetrievedChunk]) -> Result<AnswerResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AnswererError::EmptyQuestion);
        }

        let context = build_context(hits, self.max_context_chars);
        let user_prompt = hr_user_prompt(question, &context);

        log::debug!(
            "Answering with {} context chars (model {})",
            context.chars().count(),
            self.chat.model_id()
        );

        let text = self
            .chat
            .complete(HR_SYSTEM_PROMPT, &user_prompt, self.temperature)
            .await?;

        Ok(AnswerResult {
            question: question.to_string(),
            answer: text.trim().to_string(),
            used_context_chars: context.chars().count(),
            model: self.chat.model_id().to_string(),
        })
    }

    /// Strict-grounding variant of [`Answerer::answer`]: when no chunks were
    /// retrieved there is nothing an answer could be grounded in, so this
    /// returns the refusal sentence without a chat call.
    pub async fn answer_grounded(
        &self,
        question: &str,
        hits: &[RetrievedChunk],
    ) -> Result<AnswerResult> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(AnswererError::EmptyQuestion);
        }

        if hits.is_empty() {
            log::info!("No chunks retrieved; refusing without a chat call");
            return Ok(AnswerResult {
                question: trimmed.to_string(),
                answer: REFUSAL.to_string(),
                used_context_chars: 0,
                model: self.chat.model_id().to_string(),
            });
        }

        self.answer(trimmed, hits).await
    }
}
