//! ABNT formatting
//!
//! In-text citations, the work reference and the plain-text export, following
//! the Brazilian ABNT NBR 10520 / 6023 conventions.

mod export;
mod formatter;
mod types;

pub use export::{render_export, EMPTY_RESULT_MESSAGE, EXPORT_FILE_NAME};
pub use formatter::{
    format_citation, format_imprint, format_quote_citation, format_reference, strip_emphasis,
    REFERENCE_PROMPT,
};
pub use types::{CategoryLabels, ReferenceFields};
