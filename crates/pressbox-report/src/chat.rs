use pressbox_index::{ChunkIndex, ScoredChunk};
use pressbox_llm::{LlmProvider, Message, Role};

use crate::article::truncate_chars;
use crate::error::GenerationError;

/// Number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;
/// Context block cap, in characters.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str = "You answer questions about an uploaded sports match report. \
     Be concise and ground every answer in the provided excerpts when they are present.";

#[derive(Debug, Clone)]
pub struct ChatResponder {
    top_k: usize,
    max_context_chars: usize,
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}

impl ChatResponder {
    #[must_use]
    pub fn new(top_k: usize, max_context_chars: usize) -> Self {
        Self {
            top_k,
            max_context_chars,
        }
    }

    /// Answer a question about the indexed document: retrieve the most
    /// similar chunks, assemble a bounded context block, and forward both
    /// to the model. When retrieval yields nothing the question is still
    /// forwarded, with an explicit note that no document context exists.
    ///
    /// # Errors
    ///
    /// Returns an error when retrieval or the inference call fails.
    pub async fn answer<P: LlmProvider>(
        &self,
        provider: &P,
        index: &ChunkIndex,
        question: &str,
    ) -> Result<String, GenerationError> {
        let retrieved = index.query(provider, question, self.top_k).await?;
        tracing::debug!(retrieved = retrieved.len(), "chunks retrieved for question");

        let context = build_context(&retrieved, self.max_context_chars);
        let user_prompt = if context.is_empty() {
            format!("No document context is available.\n\nQuestion: {question}")
        } else {
            format!(
                "Answer the question using the match report excerpts below.\n\n\
                 Excerpts:\n{context}\n\nQuestion: {question}"
            )
        };

        let messages = [
            Message::new(Role::System, SYSTEM_PROMPT),
            Message::new(Role::User, user_prompt),
        ];

        Ok(provider.chat(&messages).await?)
    }
}

fn build_context(chunks: &[ScoredChunk], max_chars: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for chunk in chunks {
        let remaining = max_chars.saturating_sub(used);
        if remaining == 0 {
            break;
        }
        let piece = truncate_chars(&chunk.content, remaining);
        if piece.is_empty() {
            break;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(piece);
        used += piece.chars().count();
    }
    out
}
