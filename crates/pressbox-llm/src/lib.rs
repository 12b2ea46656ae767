//! Hosted inference client: chat completions and embeddings over an
//! OpenAI-compatible HTTP surface.

pub mod error;
pub mod hf;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provider;

pub use error::LlmError;
pub use hf::HfProvider;
pub use provider::{LlmProvider, Message, Role};
