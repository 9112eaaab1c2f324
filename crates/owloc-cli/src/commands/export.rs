use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use owloc_services::{
    export_translation_json, ExportOptions, ForceOverwrite, OverwritePolicy, Result, WriteOutcome,
};

/// Interactive overwrite confirmation: prompts on stderr and reads one
/// line from stdin. Anything but an explicit yes (including a closed
/// stdin) keeps the existing file.
struct PromptOverwrite;

impl OverwritePolicy for PromptOverwrite {
    fn confirm(&self, path: &Path, pending: &str) -> Result<WriteOutcome> {
        eprint!("{} already exists. Overwrite? [y/N] ", path.display());
        std::io::stderr().flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if matches!(answer.trim(), "y" | "Y" | "yes") {
            std::fs::write(path, pending)?;
            Ok(WriteOutcome::Replaced)
        } else {
            Ok(WriteOutcome::Kept)
        }
    }
}

pub fn run_export(
    root: PathBuf,
    lang: Option<String>,
    force: bool,
    use_color: bool,
) -> Result<()> {
    tracing::debug!(event = "export_args", root = ?root, lang = ?lang, force = force);

    let config = owloc_config::load_config().unwrap_or_default();
    let options = ExportOptions {
        lang: lang.or(config.lang),
        schema_url: config.schema_url,
    };
    let force = force || config.export.and_then(|e| e.force).unwrap_or(false);

    let report = if force {
        export_translation_json(&root, &options, &ForceOverwrite)?
    } else {
        export_translation_json(&root, &options, &PromptOverwrite)?
    };

    match report.outcome {
        WriteOutcome::Created | WriteOutcome::Replaced => {
            let line = format!(
                "Exported successfully: {} ({} dialogue / {} ship log entries from {} files)",
                report.out_path.display(),
                report.dialogue_entries,
                report.ship_log_entries,
                report.files_matched
            );
            if use_color {
                use owo_colors::OwoColorize;
                println!("✔ {}", line.green());
            } else {
                println!("✔ {line}");
            }
        }
        WriteOutcome::Kept => {
            println!("ℹ Kept existing file: {}", report.out_path.display());
        }
    }
    Ok(())
}
