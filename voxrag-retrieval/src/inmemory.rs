//! In-memory vector store using brute-force cosine distance.
//!
//! [`InMemoryVectorStore`] keeps the corpus in a `HashMap` behind a
//! `tokio::sync::RwLock`. Suitable for development, testing, and small
//! corpora; it does not survive process restart (see the `sqlite` feature
//! for a persistent backend).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, QueryMatch};
use crate::error::{RagError, Result};
use crate::vectorstore::{cosine_distance, VectorStore};

/// A non-persistent [`VectorStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    chunks: RwLock<HashMap<String, Chunk>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, chunk: &Chunk) -> Result<()> {
        let mut chunks = self.chunks.write().await;
        if chunks.contains_key(&chunk.id) {
            return Err(RagError::DuplicateId(chunk.id.clone()));
        }
        chunks.insert(chunk.id.clone(), chunk.clone());
        Ok(())
    }

    async fn query(&self, embedding: &[f32], n: usize) -> Result<Vec<QueryMatch>> {
        let chunks = self.chunks.read().await;
        let mut matches: Vec<QueryMatch> = chunks
            .values()
            .map(|chunk| QueryMatch {
                text: chunk.text.clone(),
                distance: cosine_distance(&chunk.embedding, embedding),
                metadata: chunk.metadata.clone(),
            })
            .collect();
        matches.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(n);
        Ok(matches)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.chunks.read().await.len())
    }

    async fn clear(&self) -> Result<()> {
        // Swap in a fresh map: readers see the old corpus or the new empty
        // one, never an item-by-item partial delete.
        let mut chunks = self.chunks.write().await;
        *chunks = HashMap::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ChunkMetadata;

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: format!("text for {id}"),
            embedding,
            metadata: ChunkMetadata {
                source: "test.txt".into(),
                chunk_index: 0,
                total_chunks: 1,
                total_pages: None,
                chunk_length: None,
            },
        }
    }

    #[tokio::test]
    async fn add_then_count() {
        let store = InMemoryVectorStore::new();
        store.add(&chunk("a", vec![1.0, 0.0])).await.unwrap();
        store.add(&chunk("b", vec![0.0, 1.0])).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = InMemoryVectorStore::new();
        store.add(&chunk("a", vec![1.0, 0.0])).await.unwrap();
        let err = store.add(&chunk("a", vec![0.0, 1.0])).await.unwrap_err();
        assert!(matches!(err, RagError::DuplicateId(id) if id == "a"));
    }

    #[tokio::test]
    async fn query_returns_nearest_first() {
        let store = InMemoryVectorStore::new();
        store.add(&chunk("near", vec![1.0, 0.0])).await.unwrap();
        store.add(&chunk("far", vec![0.0, 1.0])).await.unwrap();
        store.add(&chunk("mid", vec![1.0, 1.0])).await.unwrap();

        let matches = store.query(&[1.0, 0.0], 3).await.unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].text, "text for near");
        assert!(matches[0].distance <= matches[1].distance);
        assert!(matches[1].distance <= matches[2].distance);
    }

    #[tokio::test]
    async fn query_returns_fewer_than_n_on_small_corpus() {
        let store = InMemoryVectorStore::new();
        store.add(&chunk("only", vec![1.0, 0.0])).await.unwrap();
        assert_eq!(store.query(&[1.0, 0.0], 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_on_empty_store_is_empty() {
        let store = InMemoryVectorStore::new();
        assert!(store.query(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = InMemoryVectorStore::new();
        store.add(&chunk("a", vec![1.0, 0.0])).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.query(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }
}
