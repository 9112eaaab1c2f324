use color_eyre::eyre::Result;
use owloc_core::ExtractedUnit;
use std::io::Write;

/// Write extracted units as CSV: one row per string with its document
/// kind and source file.
pub fn write_csv<W: Write>(writer: W, units: &[ExtractedUnit]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["kind", "file", "text"])?;
    for u in units {
        wtr.write_record([u.kind.label(), &u.path, &u.text])?;
    }

    wtr.flush()?;
    Ok(())
}
