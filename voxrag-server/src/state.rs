//! Shared application state.

use std::sync::Arc;

use voxrag_model::Generator;
use voxrag_retrieval::RetrievalEngine;

/// State shared across request handlers.
///
/// The store handle lives inside the engine and is passed by reference
/// into every retrieval call; wiping the corpus goes through the store's
/// atomic clear, so there is no global mutable collection handle to
/// reassign.
#[derive(Clone)]
pub struct AppState {
    /// The retrieval engine (embedder + vector store + chunker).
    pub engine: Arc<RetrievalEngine>,
    /// The answer generator collaborator.
    pub generator: Arc<dyn Generator>,
}
