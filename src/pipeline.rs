//! Extraction pipeline
//!
//! Entry points that turn a document (or manually tagged text) into a
//! [`CitationIndex`] and the formatted run output.
//!
//! Pages are processed concurrently. Each page task builds its own
//! [`PageBatch`]; the batches are merged in page order once every task has
//! finished, so completion order never shows in the result.

use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;

use crate::abnt::{format_reference, render_export, CategoryLabels, ReferenceFields, EMPTY_RESULT_MESSAGE};
use crate::citation::{CitationIndex, PageBatch};
use crate::color::ColorBucket;
use crate::document::{DocumentError, DocumentSource};
use crate::geometry::DEFAULT_OVERLAP_MARGIN;
use crate::highlight::match_page;
use crate::layout::{map_text_items, native_text};
use crate::manual::extract_manual_citations;
use crate::ocr::{is_scanned, ocr_page, OcrFallbackConfig, OcrService};

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No document was supplied
    #[error("No document was provided")]
    SourceUnavailable,

    /// The document could not be loaded or a page could not be read
    #[error("Document could not be read: {0}")]
    UnreadableDocument(#[from] DocumentError),

    /// Manual input was blank
    #[error("No text was provided")]
    EmptyInput,
}

/// Tuning for a document run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Slack applied to the text/highlight overlap test
    pub overlap_margin: f64,
    pub ocr: OcrFallbackConfig,
    /// OCR language for this run; the service default when `None`
    pub language: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            overlap_margin: DEFAULT_OVERLAP_MARGIN,
            ocr: OcrFallbackConfig::default(),
            language: None,
        }
    }
}

/// Quotes of one page
///
/// Pages with a usable text layer yield one quote per citable annotation.
/// Scanned pages are recognized instead and yield at most one gray quote.
/// Failing to read the page's text or annotations is fatal; OCR failures
/// are not.
pub async fn extract_page(
    doc: &dyn DocumentSource,
    page: u32,
    ocr: &OcrService,
    config: &PipelineConfig,
) -> Result<PageBatch, DocumentError> {
    let (items, annotations) = futures::try_join!(doc.text_items(page), doc.annotations(page))?;

    let runs = map_text_items(&items);
    let native = native_text(&runs);

    if !is_scanned(&native, &config.ocr) {
        return Ok(match_page(page, &runs, &annotations, config.overlap_margin));
    }

    let mut batch = PageBatch::new(page);

    if !ocr.has_providers() {
        tracing::debug!("Page {}: no text layer and no OCR provider configured", page);
        return Ok(batch);
    }

    tracing::debug!(
        "Page {}: {} native chars, falling back to OCR",
        page,
        native.trim().chars().count()
    );

    if let Some(quote) = ocr_page(doc, page, ocr, config.language.as_deref(), &config.ocr).await {
        batch.push(ColorBucket::Gray, quote);
    }

    Ok(batch)
}

/// Extract every page of a document and merge the results in page order
pub async fn extract_document(
    doc: &dyn DocumentSource,
    ocr: &OcrService,
    config: &PipelineConfig,
) -> Result<CitationIndex, ExtractError> {
    let page_count = doc.page_count();
    tracing::info!("Extracting highlights from {} pages", page_count);

    let tasks = (1..=page_count).map(|page| extract_page(doc, page, ocr, config));
    let batches = join_all(tasks)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let index = CitationIndex::merge_pages(batches);
    tracing::info!(
        "Extracted {} quotes in {} buckets",
        index.total_quotes(),
        index.len()
    );

    Ok(index)
}

/// Build an index from manually tagged text
pub fn extract_manual(text: &str) -> Result<CitationIndex, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let index = extract_manual_citations(text);
    tracing::info!("Parsed {} tagged quotes", index.total_quotes());
    Ok(index)
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    #[serde(rename = "citations")]
    pub index: CitationIndex,
    /// Formatted work reference, with emphasis markers
    pub reference: String,
    /// Plain-text export artifact
    pub export: String,
    pub total_quotes: usize,
    /// Set when the run found nothing
    pub message: Option<String>,
}

impl RunOutput {
    pub fn new(index: CitationIndex, fields: &ReferenceFields, labels: &CategoryLabels) -> Self {
        let reference = format_reference(fields);
        let export = render_export(&index, fields, labels);
        let message = index.is_empty().then(|| EMPTY_RESULT_MESSAGE.to_string());

        Self {
            total_quotes: index.total_quotes(),
            index,
            reference,
            export,
            message,
        }
    }
}
