//! Deterministic bag-of-words embedder.
//!
//! [`HashEmbedder`] maps each lowercased alphanumeric token to a dimension
//! via hashing, counts occurrences, and L2-normalizes the result. It needs
//! no network or model weights, is deterministic for identical input, and
//! gives identical texts a cosine similarity of exactly 1.0, which makes
//! it the embedder of choice for tests and keyless local runs. It captures
//! lexical overlap only, not semantics.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// A hashing bag-of-words [`EmbeddingProvider`].
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create an embedder producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let dim = (hasher.finish() % self.dimensions as u64) as usize;
            vector[dim] += 1.0;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
