//! CSV Data Loader Module
//! Reads the title export into a polars DataFrame with every column as text.

use super::REQUIRED_COLUMNS;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Loads title exports from disk.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file. Every column is read as a string so that empty cells
    /// stay missing and nothing is coerced before cleaning.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::validate_columns(&df)?;

        info!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded source CSV"
        );
        Ok(df)
    }

    /// Fail if any required column is absent.
    pub fn validate_columns(df: &DataFrame) -> Result<(), LoaderError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name));
            }
        }
        Ok(())
    }

    /// Distinct non-null values of a text column, in order of first appearance.
    pub fn distinct_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
        let values = df.column(column)?.str()?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut distinct = Vec::new();

        for value in values.into_iter().flatten() {
            if seen.insert(value) {
                distinct.push(value.to_string());
            }
        }

        debug!(column, count = distinct.len(), "Collected distinct values");
        Ok(distinct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let err = DataLoader::load_csv(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn validate_columns_names_first_missing_column() {
        let df = df!(
            "type" => ["Movie"],
            "director" => ["Someone"],
        )
        .unwrap();

        let err = DataLoader::validate_columns(&df).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn("cast")));
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let df = df!(
            "type" => [Some("TV Show"), Some("Movie"), None, Some("TV Show")],
        )
        .unwrap();

        let values = DataLoader::distinct_values(&df, "type").unwrap();
        assert_eq!(values, vec!["TV Show".to_string(), "Movie".to_string()]);
    }
}
