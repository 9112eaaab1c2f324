//! Parses New Horizons XML game data and extracts translatable strings.
//!
//! Parsing happens in two steps: `tree::parse_tree` turns raw XML into a
//! generic [`XmlNode`] tree, then `classify` reads the root element name
//! and the matching typed document (`TextBlockDocument`,
//! `DialogueTreeDocument`, `ShipLogDocument`) converts and validates the
//! tree up front, so extractors never probe for missing fields mid-walk.

use std::collections::HashSet;

use owloc_core::DocKind;
use thiserror::Error;

pub mod dialogue;
pub mod shiplog;
pub mod textblock;
pub mod tree;

pub use dialogue::DialogueTreeDocument;
pub use shiplog::ShipLogDocument;
pub use textblock::TextBlockDocument;
pub use tree::{parse_tree, XmlNode, XmlText};

/// Errors from parsing or typed-document conversion. The services layer
/// wraps these with the offending file path.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("<{parent}> is missing expected <{child}>")]
    MissingElement {
        parent: &'static str,
        child: &'static str,
    },
}

/// Decide which known document shape a parsed tree represents from its
/// single top-level element. Unknown roots are skipped by the caller,
/// not treated as an error.
pub fn classify(root: &XmlNode) -> DocKind {
    match root.name.as_str() {
        "NomaiObject" => DocKind::TextBlock,
        "DialogueTree" => DocKind::DialogueTree,
        "AstroObjectEntry" => DocKind::ShipLog,
        _ => DocKind::Unrecognized,
    }
}

/// Drop repeated strings, keeping the first occurrence in place.
/// Output determinism is a correctness requirement here, so dedup is an
/// explicit list + seen-set pair rather than an unordered set.
pub fn dedup_in_order(strings: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(strings.len());
    strings
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
