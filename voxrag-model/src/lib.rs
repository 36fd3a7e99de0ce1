//! # voxrag-model
//!
//! Generator integrations for VoxRAG.
//!
//! The [`Generator`] trait is the narrow contract the retrieval service
//! depends on: a system prompt and a user question in, answer text plus
//! model identifier and token usage out. Backends:
//!
//! - [`GroqClient`]: Groq's OpenAI-compatible chat completions API
//!   (`groq` feature, on by default)
//! - [`MockGenerator`]: canned replies and a call counter, for tests

pub mod generator;
pub mod mock;

#[cfg(feature = "groq")]
pub mod groq;

pub use generator::{Generation, Generator, ModelError, TokenUsage};
#[cfg(feature = "groq")]
pub use groq::GroqClient;
pub use mock::MockGenerator;
