//! Answer composition: turns assembled context into a generation request.

/// A prompt pair ready for the generator: the grounding system
/// instruction and the raw user question.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instruction embedding the retrieved context.
    pub system: String,
    /// The user's question, passed through verbatim.
    pub user: String,
}

/// Build the generation request for a question and its retrieved context.
///
/// The system instruction embeds the citation-headed context and the
/// grounding directives; the question goes through unchanged as the user
/// turn. No retrying, no caching; that belongs to the caller.
pub fn compose(question: &str, context: &str) -> GenerationRequest {
    let system = format!(
        "You are an assistant that answers questions using only the reference excerpts below. \
Each excerpt starts with a [Source: ...] header identifying where it came from.\n\
\n\
Reference excerpts:\n\
{context}\n\
\n\
Rules:\n\
- Answer only with information supported by the excerpts.\n\
- Cite the source of every claim using its [Source: ...] header.\n\
- If the excerpts answer the question only partially, give the partial answer \
rather than refusing.\n\
- Treat paraphrases and synonyms in the question as matching an excerpt when \
the meaning is the same.\n\
- If nothing in the excerpts is relevant, say that the available documents do \
not cover the question."
    );

    GenerationRequest { system, user: question.to_string() }
}
