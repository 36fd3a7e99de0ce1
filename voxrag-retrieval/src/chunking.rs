//! Document chunking.
//!
//! Provides the [`Chunker`] trait and [`SentenceChunker`], a greedy
//! fixed-window splitter that prefers to cut on sentence boundaries.

/// A strategy for splitting normalized text into embeddable segments.
///
/// Implementations are pure functions of their input: no hidden state,
/// safe to call concurrently.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Emitted chunks are trimmed; empty chunks are dropped. Returns an
    /// empty `Vec` for empty input.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Greedy forward scan over *characters* with sentence-boundary preference.
///
/// Each window is at most `chunk_size` characters. When the window's end
/// falls strictly before the end of the text, the splitter searches
/// backward within the window for the last `.`; if it sits beyond 50% of
/// `chunk_size`, the cut moves there so most chunks end on a whole
/// sentence. The next window starts `overlap` characters before the cut,
/// unless the cut consumed the remainder of the text.
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    chunk_size: usize,
    overlap: usize,
}

impl SentenceChunker {
    /// Default window size in characters.
    pub const DEFAULT_CHUNK_SIZE: usize = 800;
    /// Default overlap between consecutive windows in characters.
    pub const DEFAULT_OVERLAP: usize = 150;

    /// Create a new `SentenceChunker`.
    ///
    /// The scan only makes forward progress while `overlap * 2 <
    /// chunk_size` (the sentence cut can land just past the window
    /// midpoint, and the next window must still start strictly after the
    /// previous one). [`RagConfig`](crate::config::RagConfig) validates
    /// this at the configuration boundary; constructing directly clamps
    /// `overlap` to keep the invariant, since `RagConfig`'s fields are
    /// public and a struct-literal config bypasses the builder.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        let overlap = overlap.min(chunk_size.saturating_sub(1) / 2);
        Self { chunk_size, overlap }
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK_SIZE, Self::DEFAULT_OVERLAP)
    }
}

impl Chunker for SentenceChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < chars.len() {
            let mut end = (start + self.chunk_size).min(chars.len());

            if end < chars.len() {
                // Prefer cutting right after the last sentence-terminating
                // period, but only if that keeps the chunk above half the
                // window (short tails would shred sentences into fragments).
                if let Some(pos) = chars[start..end].iter().rposition(|&c| c == '.') {
                    if pos > self.chunk_size / 2 {
                        end = start + pos + 1;
                    }
                }
            }

            let piece: String = chars[start..end].iter().collect();
            let trimmed = piece.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            if end >= chars.len() {
                break;
            }
            start = end.saturating_sub(self.overlap);
        }

        chunks
    }
}
