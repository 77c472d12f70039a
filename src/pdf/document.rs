//! Native PDF backend
//!
//! Text runs come from MuPDF structured text and annotations from lopdf.
//! Parsing and text extraction are CPU-bound and run on the blocking pool;
//! so does rasterising pages for OCR.

use std::sync::Arc;

use async_trait::async_trait;
use lopdf::{Document, Object, ObjectId};

use super::annotations::{number_array, page_annotations, resolve};
use super::stext::page_text_items;
use crate::document::{
    DocumentError, DocumentSource, RawAnnotation, RawTextItem, RenderedPage, Result,
};

/// Depth limit when walking `/Parent` for inherited page attributes
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Text items of one page, or why they could not be read
type PageText = std::result::Result<Vec<RawTextItem>, String>;

/// A PDF loaded from memory
pub struct PdfDocument {
    doc: Document,
    /// Page object ids, index 0 = page 1
    pages: Vec<ObjectId>,
    /// Text items per page, extracted at load time
    text: Vec<PageText>,
    /// Original bytes, kept for the rasteriser
    data: Arc<Vec<u8>>,
}

impl PdfDocument {
    /// Parse PDF bytes on the blocking pool
    pub async fn load(data: Vec<u8>) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::from_bytes(data))
            .await
            .map_err(|e| DocumentError::ParseError(format!("Task join error: {}", e)))?
    }

    /// Parse PDF bytes and extract every page's text
    ///
    /// Encrypted documents are rejected; their strings cannot be read.
    /// Blocks; use [`PdfDocument::load`] from async code.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !data.starts_with(b"%PDF") {
            return Err(DocumentError::ParseError("not a PDF file".to_string()));
        }

        let doc = Document::load_mem(&data)?;
        if doc.is_encrypted() {
            return Err(DocumentError::ParseError("encrypted PDF".to_string()));
        }

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let text = extract_text(&data, &doc, &pages)?;

        tracing::debug!("Loaded PDF with {} pages", pages.len());

        Ok(Self {
            doc,
            pages,
            text,
            data: Arc::new(data),
        })
    }

    fn index(&self, page: u32) -> Result<usize> {
        page.checked_sub(1)
            .map(|index| index as usize)
            .filter(|&index| index < self.pages.len())
            .ok_or(DocumentError::PageNotFound(page))
    }
}

/// Lower-left corner of a page's MediaBox, following inheritance
fn media_origin(doc: &Document, page_id: ObjectId) -> (f64, f64) {
    let mut current = doc.get_dictionary(page_id).ok();

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Some(dict) = current else {
            break;
        };

        if let Some([x0, y0, x1, y1]) = number_array(doc, dict, b"MediaBox")
            .and_then(|values| <[f64; 4]>::try_from(values).ok())
        {
            return (x0.min(x1), y0.min(y1));
        }

        current = match dict.get(b"Parent").ok().and_then(|p| resolve(doc, p)) {
            Some(Object::Dictionary(parent)) => Some(parent),
            _ => None,
        };
    }

    (0.0, 0.0)
}

/// Structured text of every page
///
/// A page MuPDF cannot load keeps its error so only that page fails.
fn extract_text(data: &[u8], doc: &Document, pages: &[ObjectId]) -> Result<Vec<PageText>> {
    let document = mupdf::Document::from_bytes(data, "application/pdf")?;

    let text = pages
        .iter()
        .enumerate()
        .map(|(index, &page_id)| {
            document
                .load_page(index as i32)
                .map_err(DocumentError::from)
                .and_then(|page| page_text_items(&page, media_origin(doc, page_id)))
                .map_err(|e| e.to_string())
        })
        .collect();

    Ok(text)
}

#[async_trait]
impl DocumentSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn text_items(&self, page: u32) -> Result<Vec<RawTextItem>> {
        let index = self.index(page)?;
        self.text[index]
            .clone()
            .map_err(|message| DocumentError::ExtractionError { page, message })
    }

    async fn annotations(&self, page: u32) -> Result<Vec<RawAnnotation>> {
        let index = self.index(page)?;
        page_annotations(&self.doc, self.pages[index], page)
    }

    async fn render_page(&self, page: u32, scale: f32) -> Result<RenderedPage> {
        self.index(page)?;
        let data = Arc::clone(&self.data);

        tokio::task::spawn_blocking(move || render_with_mupdf(&data, page, scale))
            .await
            .map_err(|e| DocumentError::RenderError(format!("Task join error: {}", e)))?
    }
}

fn render_with_mupdf(data: &[u8], page: u32, scale: f32) -> Result<RenderedPage> {
    use mupdf::{Colorspace, Matrix};

    let document = mupdf::Document::from_bytes(data, "application/pdf")?;
    let page = document.load_page(page as i32 - 1)?;

    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();
    let pixmap = page.to_pixmap(&matrix, &colorspace, false, true)?;

    encode_pixmap(&pixmap)
}

/// PNG-encode a MuPDF pixmap
fn encode_pixmap(pixmap: &mupdf::Pixmap) -> Result<RenderedPage> {
    use std::io::Cursor;

    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);
    for pixel in 0..(width as usize * height as usize) {
        let offset = pixel * n;
        for channel in 0..3 {
            rgb_buffer.push(samples.get(offset + channel).copied().unwrap_or(255));
        }
    }

    let img = image::RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| DocumentError::ImageError("Failed to create image buffer".to_string()))?;

    let mut data = Vec::new();
    image::DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)?;

    Ok(RenderedPage {
        data,
        width,
        height,
    })
}
