//! Fichamento
//!
//! Extracts color-coded highlights from documents and formats them as ABNT
//! citations grouped by color.
//!
//! # Modules
//!
//! - `document`: document layer abstraction and the PDF.js dump backend
//! - `pdf`: native PDF backend (MuPDF text and rendering, lopdf annotations)
//! - `layout`, `highlight`, `color`, `geometry`: per-page matching
//! - `ocr`: OCR providers and the scanned-page fallback
//! - `manual`: manual `[color|p=N] ... [/end]` tags
//! - `citation`: quotes and the color-bucket index
//! - `abnt`: citation, reference and export formatting
//! - `pipeline`: run entry points
//!
//! The HTTP server lives in `main.rs`; `routes`, `state` and `config` are
//! public so the router can be driven from tests and benchmarks.

pub mod abnt;
pub mod citation;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod layout;
pub mod manual;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod routes;
pub mod session;
pub mod state;

pub use citation::{BucketKey, CitationIndex, Quote};
pub use color::ColorBucket;
pub use pipeline::{extract_document, extract_manual, ExtractError, PipelineConfig, RunOutput};
