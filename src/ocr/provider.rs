//! OCR Providers
//!
//! Defines the provider trait and implementations for different OCR backends.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{OcrError, OcrProvider, OcrResult};

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> OcrProvider;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Perform OCR on a PNG image
    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError>;
}

/// Tesseract OCR provider (shells out to the `tesseract` CLI)
#[cfg(feature = "ocr-tesseract")]
pub struct TesseractProvider {
    /// Default language
    default_language: String,
}

#[cfg(feature = "ocr-tesseract")]
impl TesseractProvider {
    pub fn new(default_language: &str) -> Self {
        Self {
            default_language: default_language.to_string(),
        }
    }
}

#[cfg(feature = "ocr-tesseract")]
#[async_trait]
impl OcrProviderTrait for TesseractProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        tokio::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.default_language);

        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        let output_base = temp_dir.join(format!("ocr_output_{}", uuid::Uuid::new_v4()));

        tokio::fs::write(&input_path, image_data)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        // TSV output carries per-word confidences
        let output = tokio::process::Command::new("tesseract")
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(lang)
            .arg("--psm")
            .arg("3")
            .arg("tsv")
            .output()
            .await;

        let _ = tokio::fs::remove_file(&input_path).await;

        let output =
            output.map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        let output_file = format!("{}.tsv", output_base.display());
        let tsv = tokio::fs::read_to_string(&output_file).await;
        let _ = tokio::fs::remove_file(&output_file).await;

        let tsv = tsv.map_err(|e| OcrError::ProcessingError(format!("Failed to read output: {}", e)))?;
        let (text, confidence) = parse_tesseract_tsv(&tsv);

        Ok(OcrResult {
            text,
            confidence,
            provider: OcrProvider::Tesseract,
        })
    }
}

/// Text and mean word confidence from `tesseract ... tsv` output
///
/// Columns: level, page, block, par, line, word, left, top, width, height,
/// conf, text. Rows with a negative confidence are layout rows, not words.
#[cfg_attr(not(feature = "ocr-tesseract"), allow(dead_code))]
pub(crate) fn parse_tesseract_tsv(tsv: &str) -> (String, f64) {
    let mut text = String::new();
    let mut confidences = Vec::new();
    let mut current_line: Option<(&str, &str, &str)> = None;

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }

        let Ok(conf) = cols[10].trim().parse::<f64>() else {
            continue;
        };
        let word = cols[11].trim();
        if conf < 0.0 || word.is_empty() {
            continue;
        }

        let line = (cols[2], cols[3], cols[4]);
        match current_line {
            Some(previous) if previous == line => text.push(' '),
            Some(_) => text.push('\n'),
            None => {}
        }
        current_line = Some(line);

        text.push_str(word);
        confidences.push(conf);
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    (text, confidence)
}

/// Upper bound for one page through a vision model
const OLLAMA_TIMEOUT_SECS: u64 = 120;

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    images: Vec<String>,
    stream: bool,
}

/// Non-streamed reply of `POST /api/generate`
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Transcription prompt for a scanned page
fn transcription_prompt(language: Option<&str>) -> String {
    let mut prompt =
        String::from("Transcribe all text on this scanned page exactly as written.");
    if let Some(lang) = language {
        prompt.push_str(&format!(" The page is written in '{}'.", lang));
    }
    prompt.push_str(" Reply with the transcription only.");
    prompt
}

/// Vision models report no confidence, so the result carries 0 and only the
/// length rule of the OCR fallback decides whether it is kept
fn transcription_result(reply: GenerateResponse) -> OcrResult {
    OcrResult {
        text: reply.response.trim().to_string(),
        confidence: 0.0,
        provider: OcrProvider::Ollama,
    }
}

/// Ollama vision model provider
pub struct OllamaProvider {
    client: reqwest::Client,
    /// Base URL without trailing slash
    endpoint: String,
    /// Vision model name (e.g. "llava")
    model: String,
}

impl OllamaProvider {
    pub fn new(endpoint: &str, model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(OLLAMA_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Ollama client without timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl OcrProviderTrait for OllamaProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Ollama
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        self.client
            .get(&url)
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        let request = GenerateRequest {
            model: &self.model,
            prompt: transcription_prompt(language),
            images: vec![base64::engine::general_purpose::STANDARD.encode(image_data)],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::ApiError(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OcrError::ProviderNotAvailable(format!(
                "Ollama model '{}' is not installed",
                self.model
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiError(format!("Ollama HTTP {}: {}", status, body)));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::ApiError(format!("Unreadable Ollama reply: {}", e)))?;

        Ok(transcription_result(reply))
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub response: Result<OcrResult, String>,
    pub available: bool,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn returning(text: &str, confidence: f64) -> Self {
        Self {
            response: Ok(OcrResult {
                text: text.to_string(),
                confidence,
                provider: OcrProvider::Tesseract,
            }),
            available: true,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            available: true,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Tesseract
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _language: Option<&str>) -> Result<OcrResult, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.response
            .clone()
            .map_err(OcrError::ProcessingError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tesseract_tsv() {
        let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
                   1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t\n\
                   5\t1\t1\t1\t1\t1\t10\t10\t50\t12\t90.5\tPrimeira\n\
                   5\t1\t1\t1\t1\t2\t70\t10\t40\t12\t80.5\tlinha\n\
                   5\t1\t1\t1\t2\t1\t10\t30\t60\t12\t70\tSegunda\n";

        let (text, confidence) = parse_tesseract_tsv(tsv);
        assert_eq!(text, "Primeira linha\nSegunda");
        assert!((confidence - 80.333).abs() < 0.01);
    }

    #[test]
    fn test_parse_empty_tsv() {
        let (text, confidence) = parse_tesseract_tsv("level\tpage_num\n");
        assert!(text.is_empty());
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_ollama_request_shape() {
        let request = GenerateRequest {
            model: "llava",
            prompt: transcription_prompt(Some("por")),
            images: vec!["aW1n".to_string()],
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llava");
        assert_eq!(json["images"][0], "aW1n");
        assert_eq!(json["stream"], false);
        assert!(json["prompt"].as_str().unwrap().contains("'por'"));
        assert!(!transcription_prompt(None).contains("written in"));
    }

    #[test]
    fn test_ollama_reply_has_no_confidence() {
        let reply: GenerateResponse =
            serde_json::from_str(r#"{"model":"llava","response":"  texto lido \n","done":true}"#).unwrap();
        let result = transcription_result(reply);

        assert_eq!(result.text, "texto lido");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.provider, OcrProvider::Ollama);

        let empty: GenerateResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(transcription_result(empty).text.is_empty());
    }

    #[test]
    fn test_ollama_endpoint_trailing_slash() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llava");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.provider_type(), OcrProvider::Ollama);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Ollama".parse::<OcrProvider>().unwrap(), OcrProvider::Ollama);
        assert!("abbyy".parse::<OcrProvider>().is_err());
    }
}
