use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::ColumnChoice;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// User parameters for one extraction run.
///
/// Loaded from an optional JSON file; command-line flags override it.
///
/// ```json
/// {
///   "input_file": "postprocess.star",
///   "output_file": "fsc_for_prism.csv",
///   "fsc_column": "CorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps",
///   "resolution_column": "AngstromResolution"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub fsc_column: String,
    pub resolution_column: String,
}

impl Default for Config {
    fn default() -> Self {
        let columns = ColumnChoice::default();
        Self {
            input_file: PathBuf::from("postprocess.star"),
            output_file: PathBuf::from("fsc_for_prism.csv"),
            fsc_column: columns.fsc,
            resolution_column: columns.resolution,
        }
    }
}

impl Config {
    /// Read a JSON config; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Column names the pipeline should use.
    pub fn columns(&self) -> ColumnChoice {
        ColumnChoice {
            fsc: self.fsc_column.clone(),
            resolution: self.resolution_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fsc_column": "FourierShellCorrelationMaskedMaps" }}"#).unwrap();
        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.fsc_column, "FourierShellCorrelationMaskedMaps");
        assert_eq!(config.resolution_column, "AngstromResolution");
        assert_eq!(config.output_file, PathBuf::from("fsc_for_prism.csv"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fsc_colum": "typo" }}"#).unwrap();
        assert!(Config::from_json_file(file.path()).is_err());
    }

    #[test]
    fn columns_follow_config() {
        let config = Config {
            resolution_column: "Resolution".into(),
            ..Config::default()
        };
        let columns = config.columns();
        assert_eq!(columns.resolution, "Resolution");
        assert_eq!(columns.fsc, ColumnChoice::default().fsc);
    }
}
