use pressbox_index::IndexError;
use pressbox_llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("inference failed: {0}")]
    Llm(#[from] LlmError),

    #[error("retrieval failed: {0}")]
    Index(#[from] IndexError),
}
