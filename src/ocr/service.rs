//! OCR Service
//!
//! Orchestrates OCR providers. Recognition is serialized: one page image is
//! processed at a time, whatever the number of concurrent page tasks.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    provider::{OcrProviderTrait, OllamaProvider},
    types::{OcrError, OcrProvider, OcrResult},
};

/// OCR service configuration
#[derive(Debug, Clone)]
pub struct OcrServiceConfig {
    /// Preferred provider order
    pub providers: Vec<OcrProvider>,
    /// Ollama base URL
    pub ollama_url: String,
    /// Ollama model name
    pub ollama_model: String,
    /// Default OCR language (Tesseract code)
    pub default_language: String,
}

impl Default for OcrServiceConfig {
    fn default() -> Self {
        Self {
            providers: vec![OcrProvider::Tesseract, OcrProvider::Ollama],
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llava".to_string(),
            default_language: "por".to_string(),
        }
    }
}

/// OCR service for processing scanned PDF pages
pub struct OcrService {
    config: OcrServiceConfig,
    providers: Vec<Arc<dyn OcrProviderTrait>>,
    gate: Mutex<()>,
}

impl OcrService {
    /// Create a new OCR service
    pub fn new(config: OcrServiceConfig) -> Self {
        let mut providers: Vec<Arc<dyn OcrProviderTrait>> = Vec::new();

        for provider in &config.providers {
            match provider {
                #[cfg(feature = "ocr-tesseract")]
                OcrProvider::Tesseract => {
                    use super::provider::TesseractProvider;
                    providers.push(Arc::new(TesseractProvider::new(&config.default_language)));
                }
                #[cfg(not(feature = "ocr-tesseract"))]
                OcrProvider::Tesseract => {
                    tracing::debug!("Tesseract requested but the ocr-tesseract feature is disabled");
                }
                OcrProvider::Ollama => {
                    providers.push(Arc::new(OllamaProvider::new(
                        &config.ollama_url,
                        &config.ollama_model,
                    )));
                }
            }
        }

        Self::with_providers(config, providers)
    }

    /// Create a service over an explicit provider chain
    pub fn with_providers(config: OcrServiceConfig, providers: Vec<Arc<dyn OcrProviderTrait>>) -> Self {
        Self {
            config,
            providers,
            gate: Mutex::new(()),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Get available providers
    pub async fn available_providers(&self) -> Vec<OcrProvider> {
        let mut available = Vec::new();
        for provider in &self.providers {
            if provider.is_available().await {
                available.push(provider.provider_type());
            }
        }
        available
    }

    /// Recognize a PNG image with the first provider that succeeds
    ///
    /// Unavailable providers are skipped; a failing one hands over to the
    /// next, and the last failure is returned when none succeeds.
    pub async fn recognize(&self, image_data: &[u8], language: Option<&str>) -> Result<OcrResult, OcrError> {
        let lang = language.unwrap_or(&self.config.default_language);
        let _turn = self.gate.lock().await;

        let mut last_error = None;
        for provider in &self.providers {
            if provider.is_available().await {
                match provider.recognize(image_data, Some(lang)).await {
                    Ok(result) => return Ok(result),
                    Err(e) => {
                        tracing::warn!(
                            "OCR provider {:?} failed: {}, trying next",
                            provider.provider_type(),
                            e
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            OcrError::ProviderNotAvailable("No OCR providers available".to_string())
        }))
    }
}
