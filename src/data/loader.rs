use std::path::Path;

use anyhow::{Context, Result};

use super::block::extract_block;
use super::error::FscError;
use super::interpolate::{find_crossings, CrossingResult};
use super::model::{build_table, FscTable};
use super::schema::parse_block;

// ---------------------------------------------------------------------------
// Column choice
// ---------------------------------------------------------------------------

/// Which columns hold the correlation curve and the resolution axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChoice {
    pub fsc: String,
    pub resolution: String,
}

impl Default for ColumnChoice {
    fn default() -> Self {
        Self {
            fsc: "CorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps".to_string(),
            resolution: "AngstromResolution".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// FscDataset – everything the report side needs
// ---------------------------------------------------------------------------

/// Parsed FSC table with its derived resolution estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct FscDataset {
    /// Human-readable origin (file name or `<memory>`).
    pub source: String,
    pub table: FscTable,
    pub crossings: CrossingResult,
    /// Data rows dropped because they did not fully coerce.
    pub rejected: usize,
    pub columns: ColumnChoice,
}

impl FscDataset {
    /// Resolution values in table order, if the column exists.
    pub fn resolution(&self) -> Option<Vec<f64>> {
        self.table.column(&self.columns.resolution)
    }

    /// `(resolution, value)` points for one curve column.
    pub fn curve(&self, column: &str) -> Option<Vec<[f64; 2]>> {
        self.table.points(&self.columns.resolution, column)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Run the full pipeline over an in-memory report.
pub fn analyze_str(text: &str, columns: &ColumnChoice, source: &str) -> Result<FscDataset, FscError> {
    let block = extract_block(text.lines());
    if block.is_empty() {
        log::warn!("{source}: no data_fsc block found");
    }

    let parsed = parse_block(block);
    if parsed.schema.is_empty() && !parsed.rows.is_empty() {
        log::warn!("{source}: FSC block has {} rows but no _rln column declarations", parsed.rows.len());
    }
    let built = match build_table(&parsed.schema, &parsed.rows) {
        Ok(built) => built,
        Err(e) => {
            log::warn!("{source}: {e}");
            return Err(e);
        }
    };
    if built.rejected > 0 {
        log::info!("{source}: dropped {} malformed FSC rows", built.rejected);
    }

    let crossings = find_crossings(&built.table, &columns.fsc, &columns.resolution);
    log::info!(
        "{source}: {} FSC rows, FSC=0.143 at {:?} Å, FSC=0.5 at {:?} Å",
        built.table.len(),
        crossings.fsc_0143,
        crossings.fsc_05
    );

    Ok(FscDataset {
        source: source.to_string(),
        table: built.table,
        crossings,
        rejected: built.rejected,
        columns: columns.clone(),
    })
}

/// Read a postprocess STAR file and run the pipeline.
pub fn load_file(path: &Path, columns: &ColumnChoice) -> Result<FscDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "star" {
        log::warn!("{}: expected a .star file, trying anyway", path.display());
    }

    let text = std::fs::read_to_string(path).map_err(|source| FscError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    analyze_str(&text, columns, &source)
        .with_context(|| format!("extracting FSC data from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOL: f64 = 1e-9;

    const POSTPROCESS: &str = "
# version 30001

data_general

_rlnFinalResolution                          5.430000

# version 30001

data_fsc

loop_
_rlnSpectralIndex #1
_rlnAngstromResolution #2
_rlnFourierShellCorrelationMaskedMaps #3
_rlnCorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps #4
     0    20.000000     0.990000     0.950000
     1    10.000000     0.700000     0.600000
     2     8.000000     0.450000     0.400000
     3     5.000000     0.150000     0.100000

# version 30001

data_guinier

loop_
_rlnResolutionSquared #1
_rlnLogAmplitudesOriginal #2
     0.002500   -12.000000
";

    #[test]
    fn end_to_end_postprocess() {
        let ds = analyze_str(POSTPROCESS, &ColumnChoice::default(), "test").unwrap();
        assert_eq!(ds.table.len(), 4);
        assert_eq!(ds.table.schema().len(), 4);
        // The "# version" line ahead of data_guinier sits inside the block.
        assert_eq!(ds.rejected, 1);
        assert!((ds.crossings.fsc_05.unwrap() - 9.0).abs() < TOL);
        assert!((ds.crossings.fsc_0143.unwrap() - 5.43).abs() < TOL);
        assert_eq!(ds.resolution(), Some(vec![20.0, 10.0, 8.0, 5.0]));
    }

    #[test]
    fn pipeline_is_deterministic() {
        let a = analyze_str(POSTPROCESS, &ColumnChoice::default(), "a").unwrap();
        let b = analyze_str(POSTPROCESS, &ColumnChoice::default(), "a").unwrap();
        assert_eq!(a, b);
        let bits = |d: &FscDataset| -> Vec<u64> {
            d.table.rows().iter().flatten().map(|v| v.to_bits()).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn no_block_is_empty_table() {
        let text = "data_general\n_rlnFinalResolution 3.0\n";
        let err = analyze_str(text, &ColumnChoice::default(), "t").unwrap_err();
        assert!(matches!(err, FscError::EmptyTable { rejected: 0 }));
    }

    #[test]
    fn rows_without_declarations_are_all_rejected() {
        let text = "data_fsc\nloop_\n10.0 0.9\n5.0 0.1\ndata_guinier\n";
        let err = analyze_str(text, &ColumnChoice::default(), "t").unwrap_err();
        assert!(matches!(err, FscError::EmptyTable { rejected: 2 }));
    }

    #[test]
    fn other_correlation_column_can_be_chosen() {
        let columns = ColumnChoice {
            fsc: "FourierShellCorrelationMaskedMaps".into(),
            ..ColumnChoice::default()
        };
        let ds = analyze_str(POSTPROCESS, &columns, "t").unwrap();
        // 0.70 -> 0.45 crosses 0.5 between 10 Å and 8 Å.
        let expected = 10.0 + (0.5 - 0.7) * (8.0 - 10.0) / (0.45 - 0.7);
        assert!((ds.crossings.fsc_05.unwrap() - expected).abs() < TOL);
    }

    #[test]
    fn missing_correlation_column_keeps_table() {
        let columns = ColumnChoice {
            fsc: "NoSuchColumn".into(),
            ..ColumnChoice::default()
        };
        let ds = analyze_str(POSTPROCESS, &columns, "t").unwrap();
        assert_eq!(ds.table.len(), 4);
        assert_eq!(ds.crossings, CrossingResult::default());
    }

    #[test]
    fn load_file_reads_star() {
        let mut file = tempfile::Builder::new().suffix(".star").tempfile().unwrap();
        file.write_all(POSTPROCESS.as_bytes()).unwrap();
        let ds = load_file(file.path(), &ColumnChoice::default()).unwrap();
        assert_eq!(ds.table.len(), 4);
        assert!(ds.source.ends_with(".star"));
    }

    #[test]
    fn load_file_missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.star"), &ColumnChoice::default()).unwrap_err();
        assert!(err.downcast_ref::<FscError>().is_some());
    }
}
