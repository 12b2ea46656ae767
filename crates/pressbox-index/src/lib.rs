//! Document ingestion for uploaded match reports: PDF text extraction,
//! overlapping fixed-window chunking, and an in-memory embedding index
//! with cosine top-k retrieval.

pub mod document;
pub mod index;
pub mod splitter;

pub use document::{Document, ExtractError, PdfExtractor};
pub use index::{ChunkIndex, IndexError, ScoredChunk};
pub use splitter::{Chunk, SplitterConfig, TextSplitter};
