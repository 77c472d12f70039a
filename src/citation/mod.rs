//! Citation model and aggregation
//!
//! [`Quote`]s are the atomic unit of extracted evidence. Every producer
//! (annotation matching, OCR fallback, manual tags) emits [`PageBatch`]es
//! which the [`CitationIndex`] merges into color buckets.

mod index;
mod types;

pub use index::{CitationIndex, PageBatch};
pub use types::{normalize_whitespace, BucketKey, Quote};
