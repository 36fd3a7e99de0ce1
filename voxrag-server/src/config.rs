//! Server configuration from the environment.

use std::path::PathBuf;

/// Environment-driven configuration for the service binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BIND_ADDR`, default `0.0.0.0:8002`).
    pub bind_addr: String,
    /// SQLite corpus location (`VOXRAG_DB`, default `voxrag.db`).
    pub database_path: PathBuf,
    /// Groq API key (`GROQ_API_KEY`, required).
    pub groq_api_key: String,
    /// Generator model override (`GROQ_MODEL`).
    pub groq_model: Option<String>,
    /// OpenAI-compatible embeddings endpoint (`EMBEDDINGS_URL`). When
    /// unset the service falls back to the deterministic hash embedder.
    pub embeddings_url: Option<String>,
    /// Embedding model override (`EMBEDDINGS_MODEL`, with
    /// `EMBEDDINGS_DIM` for its dimensionality).
    pub embeddings_model: Option<(String, usize)>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY is not set"))?;

        let embeddings_model = match std::env::var("EMBEDDINGS_MODEL") {
            Ok(model) => {
                let dim: usize = std::env::var("EMBEDDINGS_DIM")
                    .map_err(|_| anyhow::anyhow!("EMBEDDINGS_MODEL requires EMBEDDINGS_DIM"))?
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid EMBEDDINGS_DIM: {e}"))?;
                Some((model, dim))
            }
            Err(_) => None,
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8002".to_string()),
            database_path: std::env::var("VOXRAG_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("voxrag.db")),
            groq_api_key,
            groq_model: std::env::var("GROQ_MODEL").ok(),
            embeddings_url: std::env::var("EMBEDDINGS_URL").ok(),
            embeddings_model,
        })
    }
}
