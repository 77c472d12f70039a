//! Configuration management for the fichamento server

use std::env;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::DEFAULT_OVERLAP_MARGIN;
use crate::ocr::{OcrFallbackConfig, OcrProvider, OcrServiceConfig};
use crate::pipeline::PipelineConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upload size limit for PDFs, in megabytes
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code used when a run does not name one
    pub language: String,
    pub providers: Vec<OcrProvider>,
    pub ollama_url: String,
    pub ollama_model: String,
    pub min_confidence: f64,
    pub min_text_chars: usize,
    pub render_scale: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub overlap_margin: f64,
}

/// A variable was set but could not be parsed
#[derive(Debug, Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Default for Config {
    fn default() -> Self {
        let fallback = OcrFallbackConfig::default();
        let service = OcrServiceConfig::default();

        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_upload_mb: 50,
            },
            ocr: OcrConfig {
                language: service.default_language,
                providers: service.providers,
                ollama_url: service.ollama_url,
                ollama_model: service.ollama_model,
                min_confidence: fallback.min_confidence,
                min_text_chars: fallback.min_native_chars,
                render_scale: fallback.render_scale,
            },
            extraction: ExtractionConfig {
                overlap_margin: DEFAULT_OVERLAP_MARGIN,
            },
        }
    }
}

/// Parse `key` if it is set, keep `default` otherwise
fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { key, value }),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key -> value source, starting from the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let providers = match lookup("OCR_PROVIDERS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| {
                    name.parse().map_err(|_| ConfigError {
                        key: "OCR_PROVIDERS",
                        value: list.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.ocr.providers,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parsed(&lookup, "SERVER_PORT", defaults.server.port)?,
                max_upload_mb: parsed(&lookup, "MAX_UPLOAD_MB", defaults.server.max_upload_mb)?,
            },
            ocr: OcrConfig {
                language: lookup("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                providers,
                ollama_url: lookup("OLLAMA_URL").unwrap_or(defaults.ocr.ollama_url),
                ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ocr.ollama_model),
                min_confidence: parsed(&lookup, "OCR_MIN_CONFIDENCE", defaults.ocr.min_confidence)?,
                min_text_chars: parsed(&lookup, "OCR_MIN_TEXT_CHARS", defaults.ocr.min_text_chars)?,
                render_scale: parsed(&lookup, "OCR_RENDER_SCALE", defaults.ocr.render_scale)?,
            },
            extraction: ExtractionConfig {
                overlap_margin: parsed(&lookup, "OVERLAP_MARGIN", defaults.extraction.overlap_margin)?,
            },
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn ocr_service_config(&self) -> OcrServiceConfig {
        OcrServiceConfig {
            providers: self.ocr.providers.clone(),
            ollama_url: self.ocr.ollama_url.clone(),
            ollama_model: self.ocr.ollama_model.clone(),
            default_language: self.ocr.language.clone(),
        }
    }

    /// Pipeline settings for a run, with an optional per-run OCR language
    pub fn pipeline_config(&self, language: Option<String>) -> PipelineConfig {
        PipelineConfig {
            overlap_margin: self.extraction.overlap_margin,
            ocr: OcrFallbackConfig {
                min_native_chars: self.ocr.min_text_chars,
                min_confidence: self.ocr.min_confidence,
                render_scale: self.ocr.render_scale,
            },
            language: language.filter(|lang| !lang.trim().is_empty()),
        }
    }
}
