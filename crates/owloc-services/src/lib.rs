//! High-level orchestration layer over the parser and exporter crates.
//! Exposes stable entrypoints used by the CLI without it importing
//! parser internals.

pub mod export;
pub mod normalize;
pub mod scan;

pub use owloc_core::{DocKind, ExtractedUnit, FileBlock, OwlocError, Result};

pub use export::{
    export_translation_json, ExportOptions, ExportReport, ForceOverwrite, KeepExisting,
    OverwritePolicy, WriteOutcome,
};
pub use normalize::normalize_line_breaks;
pub use scan::{list_xml_files, scan_project, scan_units, ScanOutcome};
