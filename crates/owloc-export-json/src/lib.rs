//! Folds aggregated file blocks into identity dictionaries and renders
//! the final translation JSON.
//!
//! The output is deliberately not strict JSON: each source file's section
//! is introduced by a `// <filename>` comment line, which the New
//! Horizons translation loader tolerates and translators rely on. File
//! markers are structured data here (a distinct item variant), never
//! sentinel keys patched out of the serialized text afterwards, so a
//! translatable string that happens to start with `//` is still rendered
//! as an ordinary quoted entry.

use std::collections::HashSet;
use std::fmt::Write as _;

use owloc_core::{FileBlock, Result};

pub const TRANSLATION_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/xen-42/outer-wilds-new-horizons/main/NewHorizons/Schemas/translation_schema.json";

const PLACEHOLDER: &str = "Please add manually.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum DictItem {
    /// Rendered as a `// <filename>` comment line.
    Marker(String),
    /// Rendered as `"<value>": "<value>"`.
    Entry(String),
}

/// Ordered identity dictionary for one output section. Duplicate values
/// across the whole run collapse to their first position (a later
/// insertion is a no-op since key equals value); which file's section a
/// shared string lands in is therefore whichever file came first.
#[derive(Debug, Default)]
pub struct TranslationDictionary {
    items: Vec<DictItem>,
    seen: HashSet<String>,
}

impl TranslationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a bucket of per-file blocks into one dictionary.
    pub fn from_blocks(blocks: &[FileBlock]) -> Self {
        let mut dict = Self::new();
        for block in blocks {
            dict.push_marker(&block.file_name);
            for value in &block.strings {
                dict.push_entry(value);
            }
        }
        dict
    }

    /// Markers dedup under their `//<name>@` token so two files with the
    /// same basename collapse exactly as the sentinel-key original did.
    pub fn push_marker(&mut self, file_name: &str) {
        let token = format!("//{file_name}@");
        if self.seen.insert(token) {
            self.items.push(DictItem::Marker(file_name.to_string()));
        }
    }

    pub fn push_entry(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.items.push(DictItem::Entry(value.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of real translatable entries, markers excluded.
    pub fn entry_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, DictItem::Entry(_)))
            .count()
    }

    /// Translatable keys in output order, markers excluded.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|i| match i {
            DictItem::Entry(v) => Some(v.as_str()),
            DictItem::Marker(_) => None,
        })
    }
}

fn json_str(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?)
}

fn push_dictionary(out: &mut String, name: &str, dict: &TranslationDictionary) -> Result<()> {
    write!(out, "  \"{name}\": {{")?;
    if dict.is_empty() {
        out.push_str("},\n");
        return Ok(());
    }
    out.push('\n');
    let last = dict.items.len() - 1;
    for (i, item) in dict.items.iter().enumerate() {
        match item {
            DictItem::Marker(file_name) => {
                if i != 0 {
                    out.push('\n');
                }
                writeln!(out, "    // {file_name}")?;
            }
            DictItem::Entry(value) => {
                let quoted = json_str(value)?;
                let comma = if i == last { "" } else { "," };
                writeln!(out, "    {quoted}: {quoted}{comma}")?;
            }
        }
    }
    out.push_str("  },\n");
    Ok(())
}

/// Render the full output document: both extracted dictionaries plus the
/// static UI and achievement placeholder sections, two-space indent, a
/// blank line after every section's closing `},` and between file
/// sections inside a dictionary.
pub fn render_translation_json(
    dialogue: &TranslationDictionary,
    ship_log: &TranslationDictionary,
) -> Result<String> {
    render_with_schema(TRANSLATION_SCHEMA_URL, dialogue, ship_log)
}

pub fn render_with_schema(
    schema_url: &str,
    dialogue: &TranslationDictionary,
    ship_log: &TranslationDictionary,
) -> Result<String> {
    let mut out = String::new();
    out.push_str("{\n");
    writeln!(out, "  \"$schema\": {},", json_str(schema_url)?)?;
    push_dictionary(&mut out, "DialogueDictionary", dialogue)?;
    out.push('\n');
    push_dictionary(&mut out, "ShipLogDictionary", ship_log)?;
    out.push('\n');
    let placeholder = json_str(PLACEHOLDER)?;
    out.push_str("  \"UIDictionary\": {\n");
    writeln!(out, "    {placeholder}: {placeholder}")?;
    out.push_str("  },\n");
    out.push('\n');
    out.push_str("  \"AchievementTranslations\": {\n");
    writeln!(out, "    {placeholder}: {{}}")?;
    out.push_str("  }\n");
    out.push('}');
    Ok(out)
}
