//! Citation types

use serde::{Deserialize, Serialize};

use crate::color::ColorBucket;

/// Collapse every whitespace run to a single space and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One extracted passage
///
/// Built only through [`Quote::new`], so the text is always normalized and
/// non-empty and the page is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    page: u32,
    text: String,
}

impl Quote {
    /// Normalize `text` and build a quote, or `None` for page 0 / blank text
    pub fn new(page: u32, text: &str) -> Option<Self> {
        if page == 0 {
            return None;
        }
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return None;
        }
        Some(Self { page, text })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Key of a citation bucket
///
/// Highlights extracted from documents always land in a palette bucket.
/// Manually tagged text may use any color name; names that match the palette
/// (in English or Portuguese) resolve to it, anything else is kept as typed,
/// lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BucketKey {
    Palette(ColorBucket),
    Named(String),
}

impl BucketKey {
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match ColorBucket::from_name(&name) {
            Some(bucket) => Self::Palette(bucket),
            None => Self::Named(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Palette(bucket) => bucket.as_str(),
            Self::Named(name) => name,
        }
    }
}

impl From<ColorBucket> for BucketKey {
    fn from(bucket: ColorBucket) -> Self {
        Self::Palette(bucket)
    }
}

impl From<String> for BucketKey {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<BucketKey> for String {
    fn from(key: BucketKey) -> Self {
        key.as_str().to_string()
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
