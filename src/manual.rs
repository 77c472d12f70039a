//! Manual color tags
//!
//! Pasted text can mark citations by hand:
//!
//! ```text
//! [verde|p=3]conceito chave[/end]
//! ```
//!
//! Each tagged span becomes a quote in the named bucket. Text outside tags
//! is ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::citation::{BucketKey, CitationIndex, Quote};

/// One tagged span, matched lazily up to the first `[/end]` after its
/// opening tag; whitespace is tolerated inside the brackets
fn tagged_span() -> &'static Regex {
    static TAGGED_SPAN: OnceLock<Regex> = OnceLock::new();
    TAGGED_SPAN.get_or_init(|| {
        Regex::new(
            r"\[\s*(?P<color>\p{L}+)\s*\|\s*p\s*=\s*(?P<page>\d+)\s*\](?s:(?P<body>.*?))\[\s*/\s*(?i:end)\s*\]",
        )
        .expect("manual tag pattern is valid")
    })
}

/// Tagged spans in the order they appear
///
/// Matches are non-overlapping and leftmost-first: an opening tag runs to
/// the first `[/end]` after it, even across a later opening tag, which then
/// belongs to the body. Tags without a closing `[/end]` match nothing. Page
/// numbers of 0 or too large for `u32` drop the span, as do blank bodies.
pub fn scan_tags(text: &str) -> Vec<(BucketKey, Quote)> {
    tagged_span()
        .captures_iter(text)
        .filter_map(|caps| {
            let color = caps.name("color")?.as_str();
            let body = caps.name("body").map_or("", |m| m.as_str());
            let quote = caps
                .name("page")
                .and_then(|page| page.as_str().parse().ok())
                .and_then(|page| Quote::new(page, body));

            match quote {
                Some(quote) => Some((BucketKey::parse(color), quote)),
                None => {
                    tracing::debug!("Empty or malformed [{}] tag, skipping", color);
                    None
                }
            }
        })
        .collect()
}

/// Build a citation index from manually tagged text
///
/// Quotes keep their order of appearance within each bucket.
pub fn extract_manual_citations(text: &str) -> CitationIndex {
    let mut index = CitationIndex::new();
    for (key, quote) in scan_tags(text) {
        index.push(key, quote);
    }
    index
}
