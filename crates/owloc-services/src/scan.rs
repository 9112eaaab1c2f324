use std::path::{Path, PathBuf};

use owloc_core::{DocKind, ExtractedUnit, FileBlock, OwlocError, Result};
use owloc_parsers_xml::{
    classify, parse_tree, DialogueTreeDocument, ParseError, ShipLogDocument, TextBlockDocument,
};
use walkdir::WalkDir;

use crate::normalize::normalize_line_breaks;

/// Everything one run extracted, split into the two output buckets.
/// Block order follows the (deterministic) file-list order.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub dialogue: Vec<FileBlock>,
    pub ship_log: Vec<FileBlock>,
    pub files_matched: usize,
}

/// Find every `.xml` under `root`, sorted by file name at each level so
/// repeated runs over an unchanged tree produce identical output.
/// Extension match is case-sensitive on purpose.
pub fn list_xml_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(OwlocError::InvalidRoot(root.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().map(|e| e == "xml").unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(OwlocError::NoInputFiles(root.to_path_buf()).into());
    }
    Ok(files)
}

/// Path relative to the scan root with forward slashes, for display and
/// listings on any platform.
fn display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn parse_failure(path: &Path, err: ParseError) -> OwlocError {
    OwlocError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

struct ScannedFile {
    path: PathBuf,
    display: String,
    kind: DocKind,
    strings: Vec<String>,
}

fn scan_files(root: &Path) -> Result<Vec<ScannedFile>> {
    let files = list_xml_files(root)?;
    let mut out = Vec::new();

    for path in files {
        let xml = std::fs::read_to_string(&path)?;
        let tree = parse_tree(&xml).map_err(|e| parse_failure(&path, e))?;
        let kind = classify(&tree);

        let strings = match kind {
            DocKind::TextBlock => TextBlockDocument::from_tree(&tree)
                .map_err(|e| parse_failure(&path, e))?
                .extract(),
            DocKind::DialogueTree => DialogueTreeDocument::from_tree(&tree)
                .map_err(|e| parse_failure(&path, e))?
                .extract(),
            DocKind::ShipLog => ShipLogDocument::from_tree(&tree)
                .map_err(|e| parse_failure(&path, e))?
                .extract(),
            DocKind::Unrecognized => {
                tracing::debug!(
                    event = "scan_skip_unrecognized",
                    path = %display_path(root, &path),
                    root_element = %tree.name
                );
                continue;
            }
        };

        let strings: Vec<String> = strings.iter().map(|s| normalize_line_breaks(s)).collect();
        tracing::debug!(
            event = "scan_file",
            path = %display_path(root, &path),
            kind = %kind,
            strings = strings.len()
        );
        let display = display_path(root, &path);
        out.push(ScannedFile {
            path,
            display,
            kind,
            strings,
        });
    }

    Ok(out)
}

/// Walk `root`, parse and classify every XML file in order, extract and
/// normalize its strings, and aggregate recognized files into the
/// dialogue and ship-log buckets. Any parse or extraction failure aborts
/// the whole run; a partial dictionary is never produced.
pub fn scan_project(root: &Path) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();

    for file in scan_files(root)? {
        outcome.files_matched += 1;
        let block = FileBlock {
            file_name: file_name_of(&file.path),
            kind: file.kind,
            strings: file.strings,
        };
        match file.kind {
            DocKind::ShipLog => outcome.ship_log.push(block),
            _ => outcome.dialogue.push(block),
        }
    }

    tracing::info!(
        event = "scan_done",
        dialogue_files = outcome.dialogue.len(),
        ship_log_files = outcome.ship_log.len()
    );
    Ok(outcome)
}

/// Flat listing of every extracted string for the `scan` command.
pub fn scan_units(root: &Path) -> Result<Vec<ExtractedUnit>> {
    let mut units = Vec::new();
    for file in scan_files(root)? {
        for text in file.strings {
            units.push(ExtractedUnit {
                path: file.display.clone(),
                kind: file.kind,
                text,
            });
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const DIALOGUE: &str = "<DialogueTree><DialogueNode><Dialogue><Page>Hi</Page></Dialogue></DialogueNode></DialogueTree>";
    const SHIP_LOG: &str =
        "<AstroObjectEntry><Entry><Name>The Vessel</Name></Entry></AstroObjectEntry>";
    const TEXT_BLOCK: &str =
        "<NomaiObject><TextBlock><Text>Carved words</Text></TextBlock></NomaiObject>";

    #[test]
    fn buckets_split_by_document_kind() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "planets/dialogue.xml", DIALOGUE);
        write(dir.path(), "planets/log.xml", SHIP_LOG);
        write(dir.path(), "planets/scroll.xml", TEXT_BLOCK);

        let outcome = scan_project(dir.path())?;
        assert_eq!(outcome.files_matched, 3);
        // NomaiObject and DialogueTree both land in the dialogue bucket.
        let dialogue_files: Vec<_> = outcome
            .dialogue
            .iter()
            .map(|b| b.file_name.as_str())
            .collect();
        assert_eq!(dialogue_files, vec!["dialogue.xml", "scroll.xml"]);
        assert_eq!(outcome.ship_log.len(), 1);
        assert_eq!(outcome.ship_log[0].strings, vec!["The Vessel"]);
        Ok(())
    }

    #[test]
    fn file_list_order_is_name_sorted_per_directory() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "b.xml", DIALOGUE);
        write(dir.path(), "a.xml", TEXT_BLOCK);
        write(dir.path(), "c.xml", DIALOGUE);

        let files = list_xml_files(dir.path())?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.xml", "c.xml"]);
        Ok(())
    }

    #[test]
    fn extension_match_is_case_sensitive() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "a.XML", DIALOGUE);
        write(dir.path(), "b.xml", DIALOGUE);

        let files = list_xml_files(dir.path())?;
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("b.xml"));
        Ok(())
    }

    #[test]
    fn unrecognized_root_is_skipped_without_error() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "mod_manifest.xml", "<ModMeta><Name>thing</Name></ModMeta>");
        write(dir.path(), "real.xml", DIALOGUE);

        let outcome = scan_project(dir.path())?;
        assert_eq!(outcome.files_matched, 1);
        assert_eq!(outcome.dialogue.len(), 1);
        Ok(())
    }

    #[test]
    fn strings_are_crlf_normalized() -> Result<()> {
        let dir = tempdir()?;
        write(
            dir.path(),
            "a.xml",
            "<NomaiObject><TextBlock><Text>line one\nline two</Text></TextBlock></NomaiObject>",
        );

        let outcome = scan_project(dir.path())?;
        assert_eq!(outcome.dialogue[0].strings, vec!["line one\r\nline two"]);
        Ok(())
    }

    #[test]
    fn invalid_root_is_fatal() {
        let err = list_xml_files(Path::new("/definitely/not/a/real/path"))
            .unwrap_err()
            .downcast::<OwlocError>()
            .unwrap();
        assert!(matches!(err, OwlocError::InvalidRoot(_)));
    }

    #[test]
    fn empty_match_set_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "notes.txt", "not xml");
        let err = list_xml_files(dir.path())
            .unwrap_err()
            .downcast::<OwlocError>()
            .unwrap();
        assert!(matches!(err, OwlocError::NoInputFiles(_)));
        Ok(())
    }

    #[test]
    fn classified_file_missing_expected_field_aborts_the_run() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "good.xml", DIALOGUE);
        write(dir.path(), "truncated.xml", "<NomaiObject><Meta/></NomaiObject>");

        let err = scan_project(dir.path())
            .unwrap_err()
            .downcast::<OwlocError>()
            .unwrap();
        assert!(matches!(err, OwlocError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn malformed_xml_aborts_the_run() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "broken.xml", "<DialogueTree><DialogueNode></DialogueTree>");

        assert!(scan_project(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn scan_units_flattens_with_relative_paths() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), "planets/inner/a.xml", TEXT_BLOCK);

        let units = scan_units(dir.path())?;
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].path, "planets/inner/a.xml");
        assert_eq!(units[0].kind, DocKind::TextBlock);
        assert_eq!(units[0].text, "Carved words");
        Ok(())
    }
}
