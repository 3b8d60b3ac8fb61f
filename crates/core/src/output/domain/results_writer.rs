use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write results to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persists extraction results, one item per line.
pub trait ResultsWriter: Send {
    /// Writes `lines` to `path`. Returns `false` without touching the
    /// filesystem when there is nothing to write.
    fn write(&self, path: &Path, lines: &[String]) -> Result<bool, OutputError>;
}
