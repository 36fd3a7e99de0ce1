//! Mock generator for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::generator::{Generation, Generator, ModelError, TokenUsage};

/// A [`Generator`] that returns a canned reply and counts its calls.
///
/// Used to test service flows without a network, in particular that the
/// empty-corpus and low-confidence paths never reach the generator.
#[derive(Debug, Default)]
pub struct MockGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Create a mock that answers every call with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), calls: AtomicUsize::new(0) }
    }

    /// Number of times [`generate`](Generator::generate) has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _system: &str, _user: &str) -> Result<Generation, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Generation {
            text: self.reply.clone(),
            model: "mock".to_string(),
            usage: TokenUsage { prompt_tokens: 0, completion_tokens: 0, total_tokens: 0 },
        })
    }
}
