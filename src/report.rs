use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::loader::FscDataset;

// ---------------------------------------------------------------------------
// CSV report
// ---------------------------------------------------------------------------

/// Header comment written before the table.
pub const TITLE: &str = "# FSC Data extracted from RELION postprocess.star";

/// Format a resolution the way every report line and plot label shows it.
pub fn format_resolution(value: f64) -> String {
    format!("{value:.2}")
}

/// Write the CSV report to a file.
pub fn write_csv(path: &Path, dataset: &FscDataset) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv_to(BufWriter::new(file), dataset)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} FSC rows to {}", dataset.table.len(), path.display());
    Ok(())
}

/// Write the CSV report: comment header, column names, one line per row.
pub fn write_csv_to<W: Write>(mut out: W, dataset: &FscDataset) -> Result<()> {
    writeln!(out, "{TITLE}")?;
    if let Some(r) = dataset.crossings.fsc_0143 {
        writeln!(out, "# FSC=0.143 Resolution (Å): {}", format_resolution(r))?;
    }
    if let Some(r) = dataset.crossings.fsc_05 {
        writeln!(out, "# FSC=0.5 Resolution (Å): {}", format_resolution(r))?;
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(dataset.table.schema().names())?;
    for row in dataset.table.rows() {
        writer.write_record(row.iter().map(|v| format!("{v:.10}")))?;
    }
    writer.flush()?;
    Ok(())
}

/// Console lines summarising a run.
pub fn summary_lines(dataset: &FscDataset, output: &Path) -> Vec<String> {
    let mut lines = vec![format!("FSC data extracted and saved to {}", output.display())];
    if let Some(r) = dataset.crossings.fsc_0143 {
        lines.push(format!("FSC=0.143 resolution: {} Å", format_resolution(r)));
    }
    if let Some(r) = dataset.crossings.fsc_05 {
        lines.push(format!("FSC=0.5 resolution: {} Å", format_resolution(r)));
    }
    lines
}
