//! Document traits
//!
//! The contract the extraction pipeline needs from a document backend.

use async_trait::async_trait;

use super::error::Result;
use super::types::{RawAnnotation, RawTextItem, RenderedPage};

/// A paged document the pipeline can read highlights from
///
/// Page numbers are 1-indexed throughout.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Number of pages
    fn page_count(&self) -> u32;

    /// Raw text runs of a page, in content order
    async fn text_items(&self, page: u32) -> Result<Vec<RawTextItem>>;

    /// Raw annotation records of a page
    async fn annotations(&self, page: u32) -> Result<Vec<RawAnnotation>>;

    /// Rasterise a page at `scale` (1.0 = 72 DPI) and return PNG bytes
    async fn render_page(&self, page: u32, scale: f32) -> Result<RenderedPage>;
}
