//! ABNT citation formatter
//!
//! Plain-text output. Emphasis is marked with asterisks (`*Title*`) and can be
//! removed with [`strip_emphasis`] for export.

use std::sync::OnceLock;

use regex::Regex;

use super::types::ReferenceFields;
use crate::citation::{normalize_whitespace, Quote};

/// Shown instead of a reference when neither author nor title is known
pub const REFERENCE_PROMPT: &str =
    "Fill in the reference fields to generate the ABNT reference.";

/// Year placeholder for undated works (sine data)
const UNDATED: &str = "s.d.";

/// Author placeholder when neither surname nor title is known (sine nomine)
const UNKNOWN_AUTHOR: &str = "S.N.";

/// Author element of an in-text citation
///
/// Uppercased surname; for works without an author, the first word of the
/// title followed by an ellipsis.
fn citation_author(fields: &ReferenceFields) -> String {
    if let Some(surname) = fields.surname() {
        return surname.to_uppercase();
    }

    fields
        .title()
        .and_then(|title| title.split_whitespace().next())
        .map(|word| format!("{}...", word.to_uppercase()))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// In-text citation: `<text> (<SURNAME>, <year>, p. <page>).`
///
/// The page clause is left out when `page` is `None`.
pub fn format_citation(text: &str, page: Option<u32>, fields: &ReferenceFields) -> String {
    let text = normalize_whitespace(text);
    let author = citation_author(fields);
    let year = fields.year().unwrap_or(UNDATED);

    let parenthetical = match page {
        Some(page) => format!("({}, {}, p. {}).", author, year, page),
        None => format!("({}, {}).", author, year),
    };

    if text.is_empty() {
        parenthetical
    } else {
        format!("{} {}", text, parenthetical)
    }
}

/// In-text citation for an extracted quote
pub fn format_quote_citation(quote: &Quote, fields: &ReferenceFields) -> String {
    format_citation(quote.text(), Some(quote.page()), fields)
}

fn with_period(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

/// Publication element: `Place: Publisher, Year.`
///
/// Place and publisher are joined by a colon only when both are known, and
/// the year is added after a comma only when something precedes it. Returns
/// an empty string when all three are missing.
pub fn format_imprint(fields: &ReferenceFields) -> String {
    let origin = match (fields.place(), fields.publisher()) {
        (Some(place), Some(publisher)) => Some(format!("{}: {}", place, publisher)),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    };

    let imprint = match (origin, fields.year()) {
        (Some(origin), Some(year)) => format!("{}, {}", origin, year),
        (Some(origin), None) => origin,
        (None, Some(year)) => year.to_string(),
        (None, None) => return String::new(),
    };

    with_period(&imprint)
}

/// Author element: `SURNAME, Given; Additional.`
fn format_authors(fields: &ReferenceFields) -> Option<String> {
    let primary = fields.surname().map(|surname| match fields.given_name() {
        Some(given) => format!("{}, {}", surname.to_uppercase(), given),
        None => surname.to_uppercase(),
    });

    let authors: Vec<String> = primary
        .into_iter()
        .chain(fields.additional_authors().map(str::to_string))
        .collect();

    if authors.is_empty() {
        None
    } else {
        Some(with_period(&authors.join("; ")))
    }
}

/// `2` -> `2. ed.`; values already ending in `ed.` are kept
fn format_edition(edition: &str) -> String {
    if edition.to_lowercase().ends_with("ed.") {
        edition.to_string()
    } else {
        format!("{}. ed.", edition.trim_end_matches('.'))
    }
}

/// `300` -> `300 p.`; values already ending in `p.` are kept
fn format_page_count(pages: &str) -> String {
    if pages.ends_with("p.") {
        pages.to_string()
    } else {
        format!("{} p.", pages)
    }
}

/// Full work reference
///
/// ```text
/// SURNAME, Given; Additional. *Title*. 2. ed. Place: Publisher, Year. 300 p. Type. Available at: URL. Accessed on: DATE.
/// ```
///
/// Each element is omitted when its field is blank. With neither surname nor
/// title the reference cannot be built and [`REFERENCE_PROMPT`] is returned.
pub fn format_reference(fields: &ReferenceFields) -> String {
    if fields.surname().is_none() && fields.title().is_none() {
        return REFERENCE_PROMPT.to_string();
    }

    let mut parts = Vec::new();

    if let Some(authors) = format_authors(fields) {
        parts.push(authors);
    }

    if let Some(title) = fields.title() {
        parts.push(format!("*{}*.", title.trim_end_matches('.')));
    }

    if let Some(edition) = fields.edition() {
        parts.push(format_edition(edition));
    }

    let imprint = format_imprint(fields);
    if !imprint.is_empty() {
        parts.push(imprint);
    }

    if let Some(pages) = fields.pages() {
        parts.push(format_page_count(pages));
    }

    if let Some(document_type) = fields.document_type() {
        parts.push(with_period(document_type));
    }

    if let Some(url) = fields.url() {
        parts.push(format!("Available at: {}.", url));
    }

    if let Some(date) = fields.access_date() {
        parts.push(format!("Accessed on: {}.", date.trim_end_matches('.')));
    }

    parts.join(" ")
}

/// Remove `*emphasis*` markers, keeping the enclosed text
pub fn strip_emphasis(text: &str) -> String {
    static EMPHASIS: OnceLock<Regex> = OnceLock::new();
    let emphasis =
        EMPHASIS.get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("emphasis pattern is valid"));
    emphasis.replace_all(text, "$1").into_owned()
}
