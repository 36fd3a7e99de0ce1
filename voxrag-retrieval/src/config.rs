//! Configuration for the retrieval engine.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Tuning parameters for chunking and retrieval.
///
/// The over-fetch pair (`overfetch_factor`, `overfetch_cap`) controls how
/// many nearest neighbors are pulled before threshold filtering: the store
/// is asked for `min(top_k * overfetch_factor, overfetch_cap)` matches.
/// Vector indexes return the k nearest unconditionally even when nothing
/// is semantically close, so the threshold is the real relevance gate and
/// the over-fetch keeps it from starving `top_k`. Both values are tuned
/// heuristics, exposed here so they can be adjusted per corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk window in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunk windows in characters.
    pub chunk_overlap: usize,
    /// Default number of results returned per query.
    pub top_k: usize,
    /// Default minimum similarity in [0,1] for a match to count.
    pub similarity_threshold: f32,
    /// Over-fetch multiplier applied to `top_k` before threshold filtering.
    pub overfetch_factor: usize,
    /// Hard cap on the over-fetched candidate count.
    pub overfetch_cap: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 150,
            top_k: 5,
            similarity_threshold: 0.1,
            overfetch_factor: 3,
            overfetch_cap: 15,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Candidate count to over-fetch for a given `top_k`.
    ///
    /// `top_k` comes from untrusted request input, so the multiply
    /// saturates instead of overflowing; the cap bounds the result anyway.
    pub fn overfetch(&self, top_k: usize) -> usize {
        top_k.saturating_mul(self.overfetch_factor).min(self.overfetch_cap).max(1)
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk window in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunk windows in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the default number of results per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the default minimum similarity threshold.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the over-fetch multiplier.
    pub fn overfetch_factor(mut self, factor: usize) -> Self {
        self.config.overfetch_factor = factor;
        self
    }

    /// Set the over-fetch hard cap.
    pub fn overfetch_cap(mut self, cap: usize) -> Self {
        self.config.overfetch_cap = cap;
        self
    }

    /// Build the [`RagConfig`], validating parameter consistency.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `chunk_overlap * 2 >= chunk_size` (the sentence cut can land just
    ///   past the window midpoint, so larger overlaps would stall the scan)
    /// - `top_k == 0`
    /// - `similarity_threshold` is outside [0,1]
    /// - `overfetch_factor == 0` or `overfetch_cap == 0`
    pub fn build(self) -> Result<RagConfig> {
        let c = &self.config;
        if c.chunk_overlap * 2 >= c.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than half of chunk_size ({})",
                c.chunk_overlap, c.chunk_size
            )));
        }
        if c.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&c.similarity_threshold) {
            return Err(RagError::Config(format!(
                "similarity_threshold ({}) must be within [0, 1]",
                c.similarity_threshold
            )));
        }
        if c.overfetch_factor == 0 || c.overfetch_cap == 0 {
            return Err(RagError::Config(
                "overfetch_factor and overfetch_cap must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
