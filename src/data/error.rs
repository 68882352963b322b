use std::path::PathBuf;

/// Conditions the FSC pipeline reports to its caller.
///
/// Row-level problems never show up here: malformed rows are dropped and
/// only counted. Missing columns degrade to "not found" crossings.
#[derive(Debug, thiserror::Error)]
pub enum FscError {
    /// No data row survived numeric coercion (or there was no FSC block).
    #[error("FSC table is empty ({rejected} rows rejected)")]
    EmptyTable { rejected: usize },

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
