use std::sync::Arc;

use pressbox_index::ChunkIndex;
use pressbox_report::Article;
use tokio::sync::RwLock;

/// State for the most recently uploaded document. Replaced wholesale on
/// each new upload; never persisted.
#[derive(Debug)]
pub struct DocumentSession {
    pub text: String,
    pub index: ChunkIndex,
    pub article: Article,
}

pub type SessionStore = Arc<RwLock<Option<DocumentSession>>>;

#[must_use]
pub fn new_store() -> SessionStore {
    Arc::new(RwLock::new(None))
}
