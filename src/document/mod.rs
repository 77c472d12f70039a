//! Document layer abstraction
//!
//! The pipeline only talks to [`DocumentSource`]. Two backends exist:
//!
//! - [`PageDump`]: PDF.js-shaped JSON posted by a browser front end
//! - [`crate::pdf::PdfDocument`]: native PDF bytes read with MuPDF and lopdf
//!
//! ```rust,ignore
//! use fichamento::document::{DocumentSource, PageDump};
//!
//! let dump: PageDump = serde_json::from_str(&json)?;
//! for page in 1..=dump.page_count() {
//!     let items = dump.text_items(page).await?;
//! }
//! ```

mod dump;
mod error;
mod traits;
mod types;

pub use dump::{DumpedPage, PageDump};
#[cfg(test)]
pub(crate) use dump::png_base64;
pub use error::{DocumentError, DocumentResult, Result};
pub use traits::DocumentSource;
pub use types::{AnnotationCode, RawAnnotation, RawTextItem, RenderedPage, IDENTITY_TRANSFORM};
