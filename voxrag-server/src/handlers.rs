//! Request handlers for the VoxRAG HTTP surface.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use voxrag_model::TokenUsage;
use voxrag_retrieval::{ChunkMetadata, Retrieval};

use crate::composer;
use crate::error::ApiError;
use crate::pdf;
use crate::state::AppState;

/// Source previews in query responses are truncated to this many characters.
const PREVIEW_CHARS: usize = 200;

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "VoxRAG service online" }))
}

// ── /add-document ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DocumentMetadata {
    /// Origin identifier; generated when absent.
    pub source: Option<String>,
    /// Page count, for callers that extracted the text themselves.
    pub total_pages: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AddDocumentRequest {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

#[derive(Debug, Serialize)]
pub struct AddDocumentResponse {
    pub status: &'static str,
    pub document_id: String,
    pub chunks_added: usize,
}

/// `POST /add-document`
pub async fn add_document(
    State(state): State<AppState>,
    Json(request): Json<AddDocumentRequest>,
) -> Result<Json<AddDocumentResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }

    let metadata = request.metadata.unwrap_or_default();
    let document_id = metadata
        .source
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("doc-{}", Uuid::new_v4()));

    let ids = state
        .engine
        .ingest(&document_id, &request.text, metadata.total_pages)
        .await?;
    if ids.is_empty() {
        return Err(ApiError::Validation(
            "document contains no extractable text".to_string(),
        ));
    }

    Ok(Json(AddDocumentResponse {
        status: "success",
        document_id,
        chunks_added: ids.len(),
    }))
}

// ── /upload-pdf ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadPdfResponse {
    pub status: &'static str,
    pub filename: String,
    pub chunks_added: usize,
    pub document_ids: Vec<String>,
}

/// `POST /upload-pdf`
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadPdfResponse>, ApiError> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("failed to read upload: {e}")))?;
            upload = Some((filename, data));
            break;
        }
    }

    let Some((filename, data)) = upload else {
        return Err(ApiError::Validation("missing 'file' field".to_string()));
    };

    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ApiError::Validation(format!(
            "unsupported file type: {filename}; only PDF uploads are accepted"
        )));
    }

    let extracted = tokio::task::spawn_blocking(move || pdf::extract(&data))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let document_ids = state
        .engine
        .ingest(&filename, &extracted.text, extracted.total_pages)
        .await?;
    if document_ids.is_empty() {
        return Err(ApiError::Validation(
            "PDF contains no extractable text".to_string(),
        ));
    }

    info!(filename, chunks = document_ids.len(), "PDF ingested");

    Ok(Json(UploadPdfResponse {
        status: "success",
        filename,
        chunks_added: document_ids.len(),
        document_ids,
    }))
}

// ── /query ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    pub top_k: Option<usize>,
    pub similarity_threshold: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct SourcePreview {
    /// Chunk text truncated to 200 characters (plus ellipsis if longer).
    pub content: String,
    pub similarity: f32,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourcePreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(limit).collect();
        format!("{truncated}...")
    }
}

/// `POST /query`
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(ApiError::Validation("question must not be empty".to_string()));
    }

    let defaults = state.engine.config();
    let top_k = request.top_k.unwrap_or(defaults.top_k);
    if top_k == 0 {
        return Err(ApiError::Validation("top_k must be greater than zero".to_string()));
    }
    let threshold = request
        .similarity_threshold
        .unwrap_or(defaults.similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ApiError::Validation(
            "similarity_threshold must be within [0, 1]".to_string(),
        ));
    }

    // Empty-corpus, no-match, and low-confidence outcomes are terminal,
    // user-visible states: no generator call is made for them.
    let retrieval = state.engine.retrieve(&question, top_k, threshold).await?;
    let grounded = match retrieval {
        Retrieval::EmptyCorpus => {
            return Ok(Json(QueryResponse {
                question,
                answer: "The knowledge base is empty. Add documents before asking questions."
                    .to_string(),
                sources: Vec::new(),
                model: None,
                usage: None,
            }));
        }
        Retrieval::NoMatch => {
            return Ok(Json(QueryResponse {
                question,
                answer: "No relevant information was found for this question.".to_string(),
                sources: Vec::new(),
                model: None,
                usage: None,
            }));
        }
        Retrieval::LowConfidence { best_similarity } => {
            return Ok(Json(QueryResponse {
                question,
                answer: format!(
                    "No sufficiently relevant information was found: the closest match \
scored {best_similarity:.2}, below the similarity threshold of {threshold:.2}."
                ),
                sources: Vec::new(),
                model: None,
                usage: None,
            }));
        }
        Retrieval::Grounded(grounded) => grounded,
    };

    let prompt = composer::compose(&question, &grounded.context);
    let generation = state.generator.generate(&prompt.system, &prompt.user).await?;

    let sources = grounded
        .sources
        .into_iter()
        .map(|s| SourcePreview {
            content: preview(&s.text, PREVIEW_CHARS),
            similarity: s.similarity,
            metadata: s.metadata,
        })
        .collect();

    Ok(Json(QueryResponse {
        question,
        answer: generation.text,
        sources,
        model: Some(generation.model),
        usage: Some(generation.usage),
    }))
}

// ── /clear-database and /stats ──────────────────────────────────────

/// `DELETE /clear-database`
pub async fn clear_database(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.engine.clear().await?;
    info!("knowledge base cleared");
    Ok(Json(json!({ "status": "success" })))
}

/// `GET /stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total_documents = state.engine.count().await?;
    Ok(Json(json!({
        "total_documents": total_documents,
        "embedding_dimension": state.engine.dimensions(),
        "model": state.generator.name(),
    })))
}
