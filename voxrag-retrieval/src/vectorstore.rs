//! Vector store trait: a persisted corpus of embedded chunks with
//! nearest-neighbor query.

use async_trait::async_trait;

use crate::document::{Chunk, QueryMatch};
use crate::error::Result;

/// A storage backend for one corpus of embedded [`Chunk`]s.
///
/// The store is the only shared mutable resource in the system, so its
/// contract carries the concurrency guarantees: each [`add`](VectorStore::add)
/// is atomic from a reader's point of view (a query never observes an
/// embedding without its text and metadata), and [`clear`](VectorStore::clear)
/// is a collection-level drop-and-recreate: concurrent queries observe
/// either the pre- or post-clear corpus, never a partial one.
///
/// Distance metric: **cosine distance** (`1 - cosine_similarity`). Callers
/// convert back with `similarity = 1 - distance`.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store one chunk. Identity is `chunk.id`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DuplicateId`](crate::error::RagError::DuplicateId)
    /// if the id is already present.
    async fn add(&self, chunk: &Chunk) -> Result<()>;

    /// Return up to `n` nearest chunks to `embedding`, ascending by
    /// cosine distance (nearest first).
    ///
    /// Returns fewer than `n` matches when the corpus is smaller, and an
    /// empty sequence when it is empty.
    async fn query(&self, embedding: &[f32], n: usize) -> Result<Vec<QueryMatch>>;

    /// Number of chunks currently stored.
    async fn count(&self) -> Result<usize>;

    /// Atomically remove all chunks.
    async fn clear(&self) -> Result<()>;
}

/// Cosine distance between two vectors: `1 - cosine_similarity`.
///
/// Returns `1.0` (orthogonal) if either vector has zero magnitude.
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
