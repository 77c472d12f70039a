//! Document error types
//!
//! Errors raised by the document layer (page text, annotations, rendering).

use thiserror::Error;

/// Document layer error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Page outside 1..=page_count
    #[error("Page not found: {0}")]
    PageNotFound(u32),

    /// Failed to load or parse the document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to read a page's content or annotations
    #[error("Extraction error on page {page}: {message}")]
    ExtractionError { page: u32, message: String },

    /// Failed to render a page
    #[error("Render error: {0}")]
    RenderError(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    ImageError(String),

    /// Operation not supported by this backend
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by backends)
pub type DocumentResult<T> = Result<T>;

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::ParseError(err.to_string())
    }
}

impl From<image::ImageError> for DocumentError {
    fn from(err: image::ImageError) -> Self {
        DocumentError::ImageError(err.to_string())
    }
}

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::RenderError(err.to_string())
    }
}
