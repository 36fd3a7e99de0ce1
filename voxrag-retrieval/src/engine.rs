//! Retrieval engine: the ingest-and-retrieve orchestrator.
//!
//! [`RetrievalEngine`] composes an [`EmbeddingProvider`], a [`VectorStore`],
//! and a [`Chunker`]. The write path runs normalize → chunk → embed →
//! store; the read path runs embed → over-fetch → threshold filter →
//! truncate → context assembly. "No good match" is not an error: the read
//! path returns a [`Retrieval`] variant for every expected outcome, and
//! callers decide whether a generator call is warranted.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, ChunkMetadata};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::normalize::normalize;
use crate::vectorstore::VectorStore;

/// Separator placed between chunks in the assembled context.
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// A retrieved chunk with its similarity score and citation metadata.
#[derive(Debug, Clone)]
pub struct ScoredSource {
    /// The stored chunk text.
    pub text: String,
    /// `1 - cosine_distance`; higher is more relevant.
    pub similarity: f32,
    /// Citation metadata of the chunk.
    pub metadata: ChunkMetadata,
}

/// Assembled evidence for a grounded answer.
#[derive(Debug, Clone)]
pub struct GroundedContext {
    /// Citation-headed chunks joined with a visible separator, ready to be
    /// embedded into a generation prompt.
    pub context: String,
    /// The surviving chunks in non-increasing similarity order.
    pub sources: Vec<ScoredSource>,
}

/// Outcome of a retrieval. Every variant is an expected, user-visible
/// state; none of them is a fault.
#[derive(Debug, Clone)]
pub enum Retrieval {
    /// The corpus holds no chunks at all. Callers must not invoke the
    /// generator for this outcome.
    EmptyCorpus,
    /// The store returned no candidates for a non-empty corpus. Guarded
    /// against upstream but handled defensively.
    NoMatch,
    /// Candidates existed but none reached the similarity threshold.
    /// Carries the best similarity observed so callers can surface
    /// "closest match was still below threshold".
    LowConfidence {
        /// Highest similarity among the unfiltered candidates.
        best_similarity: f32,
    },
    /// At least one candidate passed the threshold.
    Grounded(GroundedContext),
}

/// The retrieval engine. Construct one via [`RetrievalEngine::builder()`].
///
/// Stateless apart from its collaborators: safe to share behind an `Arc`
/// and call concurrently. The vector store is the only shared mutable
/// resource, and its own contract covers interleaved reads and writes.
pub struct RetrievalEngine {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl RetrievalEngine {
    /// Create a new [`RetrievalEngineBuilder`].
    pub fn builder() -> RetrievalEngineBuilder {
        RetrievalEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Dimensionality of the embedding space.
    pub fn dimensions(&self) -> usize {
        self.embedder.dimensions()
    }

    /// Number of chunks currently in the corpus.
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Atomically wipe the corpus.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await
    }

    /// Ingest one document: normalize → chunk → embed → store.
    ///
    /// Returns the ids of the stored chunks (empty if the text normalizes
    /// to nothing). Re-ingesting the same source appends new chunks; chunk
    /// ids are fresh UUIDs and citation numbers derive from `chunk_index`,
    /// so identical text re-chunks to identical citations.
    pub async fn ingest(
        &self,
        source: &str,
        raw_text: &str,
        total_pages: Option<usize>,
    ) -> Result<Vec<String>> {
        let text = normalize(raw_text);
        let pieces = self.chunker.split(&text);
        if pieces.is_empty() {
            info!(source, chunk_count = 0, "ingested document (empty)");
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = pieces.iter().map(|p| p.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(source, error = %e, "embedding failed during ingestion");
            e
        })?;
        if embeddings.len() != pieces.len() {
            return Err(RagError::Pipeline(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                pieces.len()
            )));
        }

        let total_chunks = pieces.len();
        let mut ids = Vec::with_capacity(total_chunks);
        for (chunk_index, (text, embedding)) in pieces.into_iter().zip(embeddings).enumerate() {
            let chunk = Chunk {
                id: Uuid::new_v4().to_string(),
                metadata: ChunkMetadata {
                    source: source.to_string(),
                    chunk_index,
                    total_chunks,
                    total_pages,
                    chunk_length: Some(text.chars().count()),
                },
                text,
                embedding,
            };
            self.store.add(&chunk).await.map_err(|e| {
                error!(source, error = %e, "store add failed during ingestion");
                e
            })?;
            ids.push(chunk.id);
        }

        info!(source, chunk_count = total_chunks, "ingested document");
        Ok(ids)
    }

    /// Retrieve evidence for a question.
    ///
    /// Over-fetches `min(top_k * overfetch_factor, overfetch_cap)`
    /// candidates, converts distances to similarities (`1 - distance`
    /// under the cosine-distance metric), filters by
    /// `similarity_threshold` without reordering, truncates to `top_k`,
    /// and assembles a citation-headed context from the survivors.
    pub async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Retrieval> {
        if self.store.count().await? == 0 {
            info!("retrieval against empty corpus");
            return Ok(Retrieval::EmptyCorpus);
        }

        let query_embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during retrieval");
            e
        })?;

        let candidates = self
            .store
            .query(&query_embedding, self.config.overfetch(top_k))
            .await?;

        let Some(best) = candidates.first() else {
            return Ok(Retrieval::NoMatch);
        };
        let best_similarity = 1.0 - best.distance;

        let sources: Vec<ScoredSource> = candidates
            .into_iter()
            .map(|m| ScoredSource {
                similarity: 1.0 - m.distance,
                text: m.text,
                metadata: m.metadata,
            })
            .filter(|s| s.similarity >= similarity_threshold)
            .take(top_k)
            .collect();

        if sources.is_empty() {
            info!(best_similarity, similarity_threshold, "all candidates below threshold");
            return Ok(Retrieval::LowConfidence { best_similarity });
        }

        let context = sources
            .iter()
            .map(|s| {
                format!(
                    "[Source: {}, excerpt {}]\n{}",
                    s.metadata.source,
                    s.metadata.chunk_index + 1,
                    s.text
                )
            })
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        info!(result_count = sources.len(), "retrieval completed");
        Ok(Retrieval::Grounded(GroundedContext { context, sources }))
    }
}

/// Builder for constructing a [`RetrievalEngine`].
#[derive(Default)]
pub struct RetrievalEngineBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RetrievalEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the chunker. Defaults to a [`SentenceChunker`](crate::chunking::SentenceChunker)
    /// with the configured window and overlap.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RetrievalEngine`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the embedder or store is missing.
    pub fn build(self) -> Result<RetrievalEngine> {
        let config = self.config.unwrap_or_default();
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Config("store is required".to_string()))?;
        let chunker = self.chunker.unwrap_or_else(|| {
            Arc::new(crate::chunking::SentenceChunker::new(
                config.chunk_size,
                config.chunk_overlap,
            ))
        });

        Ok(RetrievalEngine { config, embedder, store, chunker })
    }
}
