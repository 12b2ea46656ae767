//! Prompt assembly and response handling for the match-report flows:
//! one-shot article generation and retrieval-augmented chat answering.

pub mod article;
pub mod chat;
pub mod error;

pub use article::{Article, ArticleGenerator};
pub use chat::ChatResponder;
pub use error::GenerationError;
