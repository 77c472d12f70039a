//! Plain-text export
//!
//! The downloadable artifact of a run: the reference, then every non-empty
//! bucket with its quotes and their citations.

use super::formatter::{format_quote_citation, format_reference, strip_emphasis};
use super::types::{CategoryLabels, ReferenceFields};
use crate::citation::CitationIndex;

/// Placeholder written when a run found nothing
pub const EMPTY_RESULT_MESSAGE: &str =
    "No highlights found. Check that the document has highlight annotations or use color tags.";

/// Suggested file name for the export
pub const EXPORT_FILE_NAME: &str = "fichamento_abnt.txt";

/// Render the export text
///
/// ```text
/// ABNT REFERENCE
/// SILVA, Ana. Leitura e escrita. São Paulo: Contexto, 2020.
///
/// == Conceitos ==
/// p. 3
/// conceito chave
/// conceito chave (SILVA, 2020, p. 3).
/// ```
pub fn render_export(
    index: &CitationIndex,
    fields: &ReferenceFields,
    labels: &CategoryLabels,
) -> String {
    let mut out = String::new();

    out.push_str("ABNT REFERENCE\n");
    out.push_str(&strip_emphasis(&format_reference(fields)));
    out.push('\n');

    if index.is_empty() {
        out.push('\n');
        out.push_str(EMPTY_RESULT_MESSAGE);
        out.push('\n');
        return out;
    }

    for (key, quotes) in index.iter() {
        out.push_str(&format!("\n== {} ==\n", labels.heading(key)));
        for (i, quote) in quotes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!(
                "p. {}\n{}\n{}\n",
                quote.page(),
                quote.text(),
                format_quote_citation(quote, fields)
            ));
        }
    }

    out
}
