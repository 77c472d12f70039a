//! Application state management

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::ocr::OcrService;
use crate::session::Session;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    ocr: OcrService,
    session: RwLock<Session>,
}

impl AppState {
    /// Create state with the OCR providers named in the configuration
    pub fn new(config: Config) -> Self {
        let ocr = OcrService::new(config.ocr_service_config());
        Self::with_ocr(config, ocr)
    }

    /// Create state over an already built OCR service
    pub fn with_ocr(config: Config, ocr: OcrService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                ocr,
                session: RwLock::new(Session::new()),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the OCR service
    pub fn ocr(&self) -> &OcrService {
        &self.inner.ocr
    }

    /// Get the session
    pub fn session(&self) -> &RwLock<Session> {
        &self.inner.session
    }
}

/// State with no OCR providers, for route tests
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::ocr::OcrServiceConfig;

    AppState::with_ocr(
        Config::default(),
        OcrService::with_providers(OcrServiceConfig::default(), Vec::new()),
    )
}
