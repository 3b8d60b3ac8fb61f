use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::output::domain::results_writer::{OutputError, ResultsWriter};

/// Plain text results file with a trailing newline after every line.
pub struct TextFileWriter;

impl TextFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsWriter for TextFileWriter {
    fn write(&self, path: &Path, lines: &[String]) -> Result<bool, OutputError> {
        if lines.is_empty() {
            return Ok(false);
        }

        let err = |source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(err)?;
        }

        let mut file = BufWriter::new(fs::File::create(path).map_err(err)?);
        for line in lines {
            writeln!(file, "{line}").map_err(err)?;
        }
        file.flush().map_err(err)?;
        Ok(true)
    }
}
