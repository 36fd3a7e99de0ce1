//! # voxrag-retrieval
//!
//! The retrieval engine behind VoxRAG: turns an unstructured document
//! corpus into retrievable, citable evidence for a downstream generator.
//!
//! ## Overview
//!
//! - [`normalize`]: strips extraction noise while preserving paragraphs
//! - [`SentenceChunker`]: overlapping, sentence-boundary-aware chunking
//! - [`EmbeddingProvider`]: text to fixed-dimension dense vector contract
//! - [`VectorStore`]: persisted corpus with nearest-neighbor query
//!   ([`InMemoryVectorStore`]; `SqliteVectorStore` behind the `sqlite`
//!   feature)
//! - [`RetrievalEngine`]: embed, over-fetch, threshold filter, truncate,
//!   context assembly with citations
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use voxrag_retrieval::{HashEmbedder, InMemoryVectorStore, RagConfig, Retrieval, RetrievalEngine};
//!
//! let engine = RetrievalEngine::builder()
//!     .config(RagConfig::default())
//!     .embedder(Arc::new(HashEmbedder::default()))
//!     .store(Arc::new(InMemoryVectorStore::new()))
//!     .build()?;
//!
//! engine.ingest("notes.txt", "The green ball coffee has a sweet aroma.", None).await?;
//! match engine.retrieve("what does the coffee smell like?", 5, 0.1).await? {
//!     Retrieval::Grounded(grounded) => println!("{}", grounded.context),
//!     other => println!("{other:?}"),
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod hash;
pub mod inmemory;
pub mod normalize;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod vectorstore;

pub use chunking::{Chunker, SentenceChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, ChunkMetadata, QueryMatch};
pub use embedding::EmbeddingProvider;
pub use engine::{GroundedContext, Retrieval, RetrievalEngine, RetrievalEngineBuilder, ScoredSource};
pub use error::{RagError, Result};
pub use hash::HashEmbedder;
pub use inmemory::InMemoryVectorStore;
pub use normalize::normalize;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteVectorStore;
pub use vectorstore::VectorStore;
