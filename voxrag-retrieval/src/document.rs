//! Data types for document chunks and vector search results.

use serde::{Deserialize, Serialize};

/// Provenance and position metadata attached to every [`Chunk`].
///
/// Stored alongside the chunk and echoed back verbatim in retrieval
/// results so callers can build citations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Identifier of the origin document (filename, title, or caller-supplied id).
    pub source: String,
    /// 0-based position of this chunk within its source document.
    pub chunk_index: usize,
    /// Total number of chunks the source document was split into.
    pub total_chunks: usize,
    /// Page count of the source document, when known (PDF ingestion).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    /// Length of the chunk text in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_length: Option<usize>,
}

/// A segment of a source document with its vector embedding.
///
/// Immutable once written to a store; identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier (UUID v4, globally unique within the corpus).
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// Provenance metadata.
    pub metadata: ChunkMetadata,
}

/// One row of a vector store read: the stored text, its distance to the
/// query embedding, and its metadata.
///
/// `distance` is **cosine distance** (`1 - cosine_similarity`), so nearer
/// means smaller. Stores return matches in ascending distance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    /// The stored chunk text.
    pub text: String,
    /// Cosine distance between the stored embedding and the query embedding.
    pub distance: f32,
    /// The stored chunk metadata.
    pub metadata: ChunkMetadata,
}
