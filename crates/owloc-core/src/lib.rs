use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Which of the known New Horizons XML schemas a document's root element
/// announces. Anything else is `Unrecognized` and silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocKind {
    TextBlock,
    DialogueTree,
    ShipLog,
    Unrecognized,
}

impl DocKind {
    /// Stable lowercase label used in CSV/JSON listings and log events.
    pub fn label(&self) -> &'static str {
        match self {
            DocKind::TextBlock => "text-block",
            DocKind::DialogueTree => "dialogue-tree",
            DocKind::ShipLog => "ship-log",
            DocKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One recognized file's contribution to an aggregation bucket: the file
/// name (rendered later as a `// <file>` comment) plus the deduplicated
/// strings extracted from it, in first-occurrence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileBlock {
    pub file_name: String,
    pub kind: DocKind,
    pub strings: Vec<String>,
}

/// Flat listing row used by the `scan` command outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedUnit {
    pub path: String,
    pub kind: DocKind,
    pub text: String,
}

/// Fatal conditions that terminate a run with a non-zero exit.
/// An existing output file is not here: that is a recoverable conflict
/// handed to the overwrite collaborator.
#[derive(Debug, Error)]
pub enum OwlocError {
    #[error("project root does not exist: {0}")]
    InvalidRoot(PathBuf),

    #[error("no XML files found under {0}")]
    NoInputFiles(PathBuf),

    #[error("{path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to create directory {path}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
