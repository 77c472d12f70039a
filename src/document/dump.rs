//! In-memory document built from a PDF.js extraction dump
//!
//! A browser front end runs PDF.js, collects `getTextContent()` items and
//! `getAnnotations()` records per page, and posts them as JSON. Scanned pages
//! can carry a pre-rendered PNG so the OCR fallback still has something to
//! read.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::{DocumentError, Result};
use super::traits::DocumentSource;
use super::types::{RawAnnotation, RawTextItem, RenderedPage};

/// One page of a dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedPage {
    #[serde(default)]
    pub items: Vec<RawTextItem>,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    /// Base64-encoded PNG of the rendered page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Whole-document dump, pages in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDump {
    pub pages: Vec<DumpedPage>,
}

impl PageDump {
    pub fn new(pages: Vec<DumpedPage>) -> Self {
        Self { pages }
    }

    fn page(&self, page: u32) -> Result<&DumpedPage> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .ok_or(DocumentError::PageNotFound(page))
    }
}

#[async_trait]
impl DocumentSource for PageDump {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn text_items(&self, page: u32) -> Result<Vec<RawTextItem>> {
        Ok(self.page(page)?.items.clone())
    }

    async fn annotations(&self, page: u32) -> Result<Vec<RawAnnotation>> {
        Ok(self.page(page)?.annotations.clone())
    }

    /// Dumped images are already rasterised, so `scale` is ignored
    async fn render_page(&self, page: u32, _scale: f32) -> Result<RenderedPage> {
        let encoded = self.page(page)?.image.as_deref().ok_or_else(|| {
            DocumentError::Unsupported(format!("page {} has no embedded image", page))
        })?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| DocumentError::ImageError(format!("invalid base64 image: {}", e)))?;

        let img = image::load_from_memory(&data)?;

        Ok(RenderedPage {
            width: img.width(),
            height: img.height(),
            data,
        })
    }
}

/// Base64 PNG of a blank page, for tests that need a renderable page
#[cfg(test)]
pub(crate) fn png_base64(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .unwrap();
    base64::engine::general_purpose::STANDARD.encode(buffer)
}
