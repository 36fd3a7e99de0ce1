//! PDF text extraction.
//!
//! The retrieval core never parses binary formats; this module is the
//! document-source boundary for `/upload-pdf`. Extraction is CPU-bound,
//! so handlers run it on the blocking pool. All buffers are in memory and
//! dropped on every exit path.

use crate::error::ApiError;

/// Text and page count extracted from an uploaded PDF.
#[derive(Debug)]
pub struct ExtractedPdf {
    /// Raw extracted text, prior to normalization.
    pub text: String,
    /// Page count, when the document structure is readable.
    pub total_pages: Option<usize>,
}

/// Extract text from PDF bytes.
///
/// A document we cannot parse is malformed input, not an internal fault,
/// so failures surface as [`ApiError::Validation`].
pub fn extract(bytes: &[u8]) -> Result<ExtractedPdf, ApiError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ApiError::Validation(format!("could not extract text from PDF: {e}")))?;

    let total_pages = lopdf::Document::load_mem(bytes)
        .ok()
        .map(|doc| doc.get_pages().len());

    Ok(ExtractedPdf { text, total_pages })
}
