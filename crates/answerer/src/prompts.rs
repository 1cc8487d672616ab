//! Prompt templates for grounded HR answers.
//!
//! The system prompt pins the model to the supplied context and mandates the
//! literal refusal sentence when the context cannot support an answer. Both
//! templates are part of the answer contract; tests assert against the
//! refusal wording, so changes here ripple into [`crate::REFUSAL`].

pub const HR_SYSTEM_PROMPT: &str = "\
You are an internal HR Policy Assistant.
Your job is to answer employee questions using ONLY the provided HR policy context.

Rules:
- Use only facts found in the provided context.
- If the context does not contain the answer, say: \"I don't know based on the provided HR documents.\"
- Do not guess. Do not add external knowledge.
- Be concise, clear, and business-appropriate.
- If helpful, include a short bullet list of key points.
";

/// Render the user prompt combining the question and assembled context.
#[must_use]
pub fn hr_user_prompt(question: &str, context: &str) -> String {
    format!(
        "Question:\n{question}\n\nHR policy context (quoted):\n{context}\n\nWrite the answer. \
         If the answer is not explicitly supported by the context, respond with:\n\
         \"I don't know based on the provided HR documents.\"\n"
    )
}
