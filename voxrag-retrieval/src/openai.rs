//! Embedding provider for OpenAI-compatible `/embeddings` endpoints.
//!
//! This module is only available when the `openai` feature is enabled.
//! It speaks the OpenAI embeddings wire format, which local inference
//! servers (text-embeddings-inference, Ollama, vLLM) also expose, so the
//! same adapter covers both hosted and self-hosted models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The hosted OpenAI embeddings endpoint.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Default model for self-hosted deployments; a 384-dimension sentence
/// transformer, matching the corpus embedding dimension.
const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Dimensionality of the default model.
const DEFAULT_DIMENSIONS: usize = 384;

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
pub struct OpenAIEmbeddingProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbeddingProvider {
    /// Create a provider against the hosted OpenAI endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Embedding {
                provider: "openai".into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self {
            client: reqwest::Client::new(),
            url: OPENAI_EMBEDDINGS_URL.into(),
            api_key: Some(api_key),
            model: model.into(),
            dimensions,
        })
    }

    /// Create a provider against a self-hosted OpenAI-compatible endpoint.
    ///
    /// `base_url` is the server root (e.g. `http://localhost:8080`); the
    /// `/embeddings` path is appended. No API key is sent. Uses the
    /// default 384-dimension sentence-transformer model unless overridden
    /// with [`with_model`](Self::with_model).
    pub fn compatible(base_url: impl AsRef<str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/embeddings", base_url.as_ref().trim_end_matches('/')),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Override the model name and its output dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

impl OpenAIEmbeddingProvider {
    fn upstream_error(&self, message: String) -> RagError {
        RagError::Embedding { provider: self.model.clone(), message }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| self.upstream_error("API returned empty response".into()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, batch_size = texts.len(), "embedding batch");

        let mut request = self
            .client
            .post(&self.url)
            .json(&EmbeddingRequest { model: &self.model, input: texts.to_vec() });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(model = %self.model, error = %e, "embedding request failed");
            self.upstream_error(format!("request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(model = %self.model, %status, "embedding API error");
            return Err(self.upstream_error(format!("API returned {status}: {body}")));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| self.upstream_error(format!("failed to parse response: {e}")))?;

        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
