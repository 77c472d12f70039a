//! OCR fallback for scanned pages
//!
//! A page whose text layer is (nearly) empty is rendered and recognized as a
//! whole. The result becomes a single quote; OCR carries no highlight color,
//! so callers file it under the gray bucket.

use serde::{Deserialize, Serialize};

use crate::citation::{normalize_whitespace, Quote};
use crate::document::DocumentSource;

use super::service::OcrService;
use super::types::OcrResult;

/// Thresholds for the OCR fallback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrFallbackConfig {
    /// Pages with fewer native characters than this are treated as scanned;
    /// recognized text shorter than this is "short"
    pub min_native_chars: usize,
    /// Confidence (0-100) below which short output is rejected
    pub min_confidence: f64,
    /// Render scale for recognition (1.0 = 72 DPI)
    pub render_scale: f32,
}

impl Default for OcrFallbackConfig {
    fn default() -> Self {
        Self {
            min_native_chars: 50,
            min_confidence: 50.0,
            render_scale: 2.0,
        }
    }
}

/// Whether a page's native text is too thin to cite from
pub fn is_scanned(native_text: &str, config: &OcrFallbackConfig) -> bool {
    native_text.trim().chars().count() < config.min_native_chars
}

/// Normalized text of an acceptable recognition result
///
/// Rejected when empty, or when confidence is low *and* the text is short.
/// Ollama reports confidence 0, so its output is kept exactly when it is
/// long enough.
pub fn accept_recognition(result: &OcrResult, config: &OcrFallbackConfig) -> Option<String> {
    let text = normalize_whitespace(&result.text);
    if text.is_empty() {
        return None;
    }

    let short = text.chars().count() < config.min_native_chars;
    if result.confidence < config.min_confidence && short {
        return None;
    }

    Some(text)
}

/// Render and recognize one page
///
/// Rendering and recognition failures are logged and yield `None`; a failed
/// page never aborts the run.
pub async fn ocr_page(
    doc: &dyn DocumentSource,
    page: u32,
    ocr: &OcrService,
    language: Option<&str>,
    config: &OcrFallbackConfig,
) -> Option<Quote> {
    let rendered = match doc.render_page(page, config.render_scale).await {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::warn!("Page {}: could not render for OCR: {}", page, e);
            return None;
        }
    };

    tracing::debug!(
        "Page {}: running OCR on {}x{} render",
        page,
        rendered.width,
        rendered.height
    );

    let result = match ocr.recognize(&rendered.data, language).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Page {}: OCR failed: {}", page, e);
            return None;
        }
    };

    match accept_recognition(&result, config) {
        Some(text) => Quote::new(page, &text),
        None => {
            tracing::info!(
                "Page {}: OCR output rejected ({:.0}% confidence, {} chars)",
                page,
                result.confidence,
                result.text.trim().chars().count()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document::{png_base64, DumpedPage, PageDump};
    use crate::ocr::provider::{MockProvider, OcrProviderTrait};
    use crate::ocr::{OcrProvider, OcrServiceConfig};

    fn result(text: &str, confidence: f64) -> OcrResult {
        OcrResult {
            text: text.to_string(),
            confidence,
            provider: OcrProvider::Tesseract,
        }
    }

    fn service(provider: Arc<MockProvider>) -> OcrService {
        OcrService::with_providers(
            OcrServiceConfig::default(),
            vec![provider as Arc<dyn OcrProviderTrait>],
        )
    }

    fn scanned_page_dump() -> PageDump {
        PageDump::new(vec![DumpedPage {
            image: Some(png_base64(2, 2)),
            ..Default::default()
        }])
    }

    #[test]
    fn test_is_scanned() {
        let config = OcrFallbackConfig::default();
        assert!(is_scanned("", &config));
        assert!(is_scanned("ten chars!", &config));
        assert!(is_scanned(&format!("   {}   ", "x".repeat(49)), &config));
        assert!(!is_scanned(&"x".repeat(50), &config));
    }

    #[test]
    fn test_low_confidence_short_text_rejected() {
        let config = OcrFallbackConfig::default();
        // 30 characters at 40%
        let short = "abcde fghij klmno pqrst uvwxy.";
        assert_eq!(short.chars().count(), 30);
        assert!(accept_recognition(&result(short, 40.0), &config).is_none());
    }

    #[test]
    fn test_either_condition_alone_is_accepted() {
        let config = OcrFallbackConfig::default();
        let long = "a fairly long recognized paragraph that clearly exceeds fifty characters";

        assert_eq!(
            accept_recognition(&result("short but confident", 95.0), &config).as_deref(),
            Some("short but confident")
        );
        assert!(accept_recognition(&result(long, 20.0), &config).is_some());
        assert!(accept_recognition(&result("   \n ", 99.0), &config).is_none());
    }

    #[test]
    fn test_unscored_output_decided_by_length() {
        let config = OcrFallbackConfig::default();
        let unscored = |text: &str| OcrResult {
            text: text.to_string(),
            confidence: 0.0,
            provider: OcrProvider::Ollama,
        };

        assert!(accept_recognition(&unscored("Capítulo 1"), &config).is_none());
        let page = "Texto transcrito pelo modelo de visão com mais de cinquenta caracteres.";
        assert_eq!(
            accept_recognition(&unscored(page), &config).as_deref(),
            Some(page)
        );
    }

    #[tokio::test]
    async fn test_ocr_page_produces_quote() {
        let provider = Arc::new(MockProvider::returning("  texto   digitalizado  ", 88.0));
        let quote = ocr_page(
            &scanned_page_dump(),
            1,
            &service(provider.clone()),
            Some("por"),
            &OcrFallbackConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(quote.page(), 1);
        assert_eq!(quote.text(), "texto digitalizado");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ocr_page_absorbs_engine_errors() {
        let provider = Arc::new(MockProvider::failing("boom"));
        let quote = ocr_page(
            &scanned_page_dump(),
            1,
            &service(provider),
            None,
            &OcrFallbackConfig::default(),
        )
        .await;
        assert!(quote.is_none());
    }

    #[tokio::test]
    async fn test_ocr_page_absorbs_render_errors() {
        let provider = Arc::new(MockProvider::returning("never used", 99.0));
        let dump = PageDump::new(vec![DumpedPage::default()]);
        let quote = ocr_page(
            &dump,
            1,
            &service(provider.clone()),
            None,
            &OcrFallbackConfig::default(),
        )
        .await;

        assert!(quote.is_none());
        assert_eq!(provider.call_count(), 0);
    }
}
