use pressbox_llm::{LlmError, LlmProvider};

use crate::splitter::Chunk;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("cannot build an index from zero chunks")]
    EmptyBuild,

    #[error("index has not been built")]
    NotBuilt,

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("embedding failed: {0}")]
    Embed(#[from] LlmError),
}

#[derive(Debug, Clone)]
struct IndexedChunk {
    content: String,
    vector: Vec<f32>,
}

/// In-memory similarity index over a document's chunks. One index per
/// uploaded document; a new document always gets a full rebuild.
#[derive(Debug, Default)]
pub struct ChunkIndex {
    entries: Vec<IndexedChunk>,
    built: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub content: String,
    pub index: usize,
    pub score: f32,
}

impl ChunkIndex {
    /// Embed every chunk and store (vector, chunk text) pairs in chunk
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::EmptyBuild`] for an empty chunk sequence,
    /// [`IndexError::Dimension`] if the provider returns vectors of
    /// differing lengths, and propagates embedding failures.
    pub async fn build<P: LlmProvider>(
        provider: &P,
        chunks: &[Chunk],
    ) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Err(IndexError::EmptyBuild);
        }

        let mut entries = Vec::with_capacity(chunks.len());
        let mut dimension = None;
        for chunk in chunks {
            let vector = provider.embed(&chunk.content).await?;
            match dimension {
                None => dimension = Some(vector.len()),
                Some(expected) if expected != vector.len() => {
                    return Err(IndexError::Dimension {
                        expected,
                        got: vector.len(),
                    });
                }
                Some(_) => {}
            }
            entries.push(IndexedChunk {
                content: chunk.content.clone(),
                vector,
            });
        }

        tracing::debug!(chunks = entries.len(), "chunk index built");
        Ok(Self {
            entries,
            built: true,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Embed the query and return the `min(k, len)` most similar chunks,
    /// best first. Ties are broken by ascending chunk index so repeated
    /// queries over the same build are deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotBuilt`] when called before any build, and
    /// propagates embedding failures.
    pub async fn query<P: LlmProvider>(
        &self,
        provider: &P,
        text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        if !self.built {
            return Err(IndexError::NotBuilt);
        }

        let query_vector = provider.embed(text).await?;

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ScoredChunk {
                content: entry.content.clone(),
                index,
                score: cosine_similarity(&query_vector, &entry.vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
