use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use owloc_core::{OwlocError, Result};
use owloc_export_json::{render_with_schema, TranslationDictionary, TRANSLATION_SCHEMA_URL};

use crate::scan::scan_project;

/// How the final write ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Output file did not exist and was created.
    Created,
    /// Output file existed and the policy replaced it.
    Replaced,
    /// Output file existed and was left untouched.
    Kept,
}

/// Decides what happens when the output file already exists. The write
/// itself uses exclusive-create semantics, so this is the only path that
/// may replace an existing file. Implementations either write `pending`
/// to `path` or leave the file alone, and report which.
pub trait OverwritePolicy {
    fn confirm(&self, path: &Path, pending: &str) -> Result<WriteOutcome>;
}

/// Never replaces; for non-interactive callers.
pub struct KeepExisting;

impl OverwritePolicy for KeepExisting {
    fn confirm(&self, _path: &Path, _pending: &str) -> Result<WriteOutcome> {
        Ok(WriteOutcome::Kept)
    }
}

/// Always replaces (`--force`).
pub struct ForceOverwrite;

impl OverwritePolicy for ForceOverwrite {
    fn confirm(&self, path: &Path, pending: &str) -> Result<WriteOutcome> {
        std::fs::write(path, pending)?;
        Ok(WriteOutcome::Replaced)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Output language name; defaults to `english`.
    pub lang: Option<String>,
    /// Override for the emitted `$schema` URL.
    pub schema_url: Option<String>,
}

#[derive(Debug)]
pub struct ExportReport {
    pub out_path: PathBuf,
    pub outcome: WriteOutcome,
    pub files_matched: usize,
    pub dialogue_entries: usize,
    pub ship_log_entries: usize,
}

/// Run the whole pipeline: scan the project, fold both dictionaries,
/// render the translation JSON and write it to
/// `<root>/translations/<lang>.json`. An existing file is handed to
/// `policy` instead of being clobbered.
pub fn export_translation_json(
    root: &Path,
    options: &ExportOptions,
    policy: &dyn OverwritePolicy,
) -> Result<ExportReport> {
    let scanned = scan_project(root)?;
    let dialogue = TranslationDictionary::from_blocks(&scanned.dialogue);
    let ship_log = TranslationDictionary::from_blocks(&scanned.ship_log);

    let schema_url = options.schema_url.as_deref().unwrap_or(TRANSLATION_SCHEMA_URL);
    let rendered = render_with_schema(schema_url, &dialogue, &ship_log)?;

    let dir = root.join("translations");
    std::fs::create_dir_all(&dir).map_err(|e| OwlocError::DirectoryCreate {
        path: dir.clone(),
        source: e,
    })?;

    let lang = options.lang.as_deref().unwrap_or("english");
    let out_path = dir.join(format!("{lang}.json"));

    let outcome = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&out_path)
    {
        Ok(mut file) => {
            file.write_all(rendered.as_bytes())?;
            WriteOutcome::Created
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::info!(event = "export_conflict", path = %out_path.display());
            policy.confirm(&out_path, &rendered)?
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        event = "export_done",
        path = %out_path.display(),
        outcome = ?outcome,
        dialogue_entries = dialogue.entry_count(),
        ship_log_entries = ship_log.entry_count()
    );

    Ok(ExportReport {
        out_path,
        outcome,
        files_matched: scanned.files_matched,
        dialogue_entries: dialogue.entry_count(),
        ship_log_entries: ship_log.entry_count(),
    })
}
