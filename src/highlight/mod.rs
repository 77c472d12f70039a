//! Highlight extraction
//!
//! Decodes text-markup annotations, builds their boxes from quad points, and
//! matches them against the page's text runs.

mod matcher;
mod quads;
mod types;

pub use matcher::{highlighted_text, match_page};
pub use quads::quad_boxes;
pub use types::{AnnotationKind, HighlightRegion};
