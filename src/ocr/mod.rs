//! OCR Module
//!
//! Provides OCR (Optical Character Recognition) for scanned pages that have
//! no usable text layer.
//!
//! Supports multiple backends:
//! - Tesseract (local CLI, `ocr-tesseract` feature)
//! - Ollama vision models (local LLM)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fichamento::ocr::{ocr_page, OcrFallbackConfig, OcrService, OcrServiceConfig};
//!
//! let service = OcrService::new(OcrServiceConfig::default());
//! let quote = ocr_page(&document, 3, &service, Some("por"), &OcrFallbackConfig::default()).await;
//! ```

mod fallback;
mod provider;
mod service;
mod types;

pub use fallback::{accept_recognition, is_scanned, ocr_page, OcrFallbackConfig};
pub use provider::{OcrProviderTrait, OllamaProvider};
pub use service::{OcrService, OcrServiceConfig};
pub use types::{OcrError, OcrProvider, OcrResult};

#[cfg(feature = "ocr-tesseract")]
pub use provider::TesseractProvider;

#[cfg(test)]
pub(crate) use provider::MockProvider;
