//! The generator collaborator contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token accounting reported by the generator, passed through unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens produced in the completion.
    pub completion_tokens: u32,
    /// Prompt plus completion.
    pub total_tokens: u32,
}

/// A completed generation: answer text, the model that produced it, and
/// its token accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// The generated answer text.
    pub text: String,
    /// Identifier of the model that produced the answer.
    pub model: String,
    /// Token usage for the call.
    pub usage: TokenUsage,
}

/// Errors from generator backends.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Client-side configuration problem (missing key, bad model name).
    #[error("generator configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("generator transport error: {0}")]
    Transport(String),

    /// The upstream API answered with a non-success status. Distinguishable
    /// from internal faults so callers can map it to a bad-gateway class.
    #[error("generator upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the upstream API.
        status: u16,
        /// Upstream error detail.
        message: String,
    },

    /// The upstream answered 2xx but the body was not usable.
    #[error("generator returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// An LLM that turns a grounding system prompt plus a user question into
/// an answer.
///
/// Implementations do not retry and do not cache; retry policy belongs to
/// the caller.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Identifier of the configured model.
    fn name(&self) -> &str;

    /// Produce an answer for `user` under the `system` instruction.
    async fn generate(&self, system: &str, user: &str) -> Result<Generation, ModelError>;
}
