//! Persists the cleaned table as CSV.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

pub struct DataWriter;

impl DataWriter {
    /// Write the table with a header row and no index column, replacing any
    /// existing file at `path`.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), WriterError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;

        info!(path = %path.display(), rows = df.height(), "Wrote cleaned CSV");
        Ok(())
    }

    /// Acknowledgment shown once the cleaned file is on disk.
    pub fn acknowledgment(path: &Path) -> String {
        format!("Cleaned data saved as {}", path.display())
    }
}
