use std::path::PathBuf;

use color_eyre::eyre::eyre;
use owloc_services::Result;

pub fn run_scan(
    root: PathBuf,
    out_csv: Option<PathBuf>,
    out_json: Option<PathBuf>,
    format: String,
) -> Result<()> {
    tracing::debug!(
        event = "scan_args",
        root = ?root,
        out_csv = ?out_csv,
        out_json = ?out_json,
        format = %format
    );

    let units = owloc_services::scan_units(&root)?;

    match format.as_str() {
        "csv" => {
            if out_json.is_some() {
                return Err(eyre!("--out-json is only supported when --format json"));
            }
            if let Some(path) = out_csv {
                let file = std::fs::File::create(&path)?;
                owloc_export_csv::write_csv(file, &units)?;
                eprintln!("ℹ CSV saved to {}", path.display());
            } else {
                let stdout = std::io::stdout();
                owloc_export_csv::write_csv(stdout.lock(), &units)?;
            }
        }
        "json" => {
            if out_csv.is_some() {
                return Err(eyre!("--out-csv is only supported when --format csv"));
            }
            if let Some(path) = out_json {
                let file = std::fs::File::create(&path)?;
                serde_json::to_writer_pretty(file, &units)?;
                eprintln!("ℹ JSON saved to {}", path.display());
            } else {
                serde_json::to_writer(std::io::stdout().lock(), &units)?;
            }
        }
        _ => unreachable!(),
    }
    Ok(())
}
