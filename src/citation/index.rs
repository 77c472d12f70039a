//! Citation aggregation
//!
//! Collects quotes into a color -> quotes mapping. Page batches produced
//! concurrently are merged in page order, never in completion order.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{BucketKey, Quote};

/// Quotes one page (or one manual source) contributed, in encounter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBatch {
    pub page: u32,
    pub entries: Vec<(BucketKey, Quote)>,
}

impl PageBatch {
    pub fn new(page: u32) -> Self {
        Self {
            page,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<BucketKey>, quote: Quote) {
        self.entries.push((key.into(), quote));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Color bucket -> ordered quotes
///
/// A key is only ever present with at least one quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CitationIndex {
    buckets: BTreeMap<BucketKey, Vec<Quote>>,
}

impl CitationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<BucketKey>, quote: Quote) {
        self.buckets.entry(key.into()).or_default().push(quote);
    }

    /// Append a batch's quotes in their encounter order
    pub fn extend_batch(&mut self, batch: PageBatch) {
        for (key, quote) in batch.entries {
            self.push(key, quote);
        }
    }

    /// Merge page batches in ascending page order
    ///
    /// The sort is stable, so batches sharing a page number keep their
    /// relative order.
    pub fn merge_pages(mut batches: Vec<PageBatch>) -> Self {
        batches.sort_by_key(|batch| batch.page);

        let mut index = Self::new();
        for batch in batches {
            index.extend_batch(batch);
        }
        index
    }

    pub fn get(&self, key: &BucketKey) -> Option<&[Quote]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &[Quote])> {
        self.buckets.iter().map(|(key, quotes)| (key, quotes.as_slice()))
    }

    /// Number of non-empty buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_quotes(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
