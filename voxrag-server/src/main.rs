//! VoxRAG service binary.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxrag_model::{Generator, GroqClient};
use voxrag_retrieval::{
    EmbeddingProvider, HashEmbedder, OpenAIEmbeddingProvider, RagConfig, RetrievalEngine,
    SqliteVectorStore,
};
use voxrag_server::{api_routes, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = Arc::new(SqliteVectorStore::connect(&config.database_path).await?);

    let embedder: Arc<dyn EmbeddingProvider> = match &config.embeddings_url {
        Some(url) => {
            let mut provider = OpenAIEmbeddingProvider::compatible(url);
            if let Some((model, dim)) = &config.embeddings_model {
                provider = provider.with_model(model, *dim);
            }
            info!(url, "using OpenAI-compatible embeddings endpoint");
            Arc::new(provider)
        }
        None => {
            warn!("EMBEDDINGS_URL not set; falling back to the lexical hash embedder");
            Arc::new(HashEmbedder::default())
        }
    };

    let engine = RetrievalEngine::builder()
        .config(RagConfig::default())
        .embedder(embedder)
        .store(store)
        .build()?;

    let mut groq = GroqClient::new(config.groq_api_key)?;
    if let Some(model) = &config.groq_model {
        groq = groq.with_model(model);
    }
    let generator: Arc<dyn Generator> = Arc::new(groq);

    let state = AppState { engine: Arc::new(engine), generator };
    let app = api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "voxrag server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
