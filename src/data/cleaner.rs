//! Data Cleaner Module
//! Sentinel fill, essential-column row removal, date parsing and year derivation.

use super::{DATE_ADDED, ESSENTIAL_COLUMNS, SENTINEL_COLUMNS, UNKNOWN, YEAR_ADDED};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Date layouts seen in title exports, tried in order.
const DATE_FORMATS: [&str; 5] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d %B %Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cell contents read as missing, matching common CSV export conventions.
const MISSING_MARKERS: [&str; 17] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// True for blank cells and the usual missing-value markers.
pub fn is_missing(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || MISSING_MARKERS.contains(&raw)
}

/// Parse a `date_added` cell. The sentinel and anything unparseable yield `None`.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

/// Leading integer of a free-text magnitude such as `"90 min"` or `"3 Seasons"`.
pub fn extract_leading_int(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(raw.len());

    let digits = &raw[..end];
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(value = digits, error = %e, "Duration magnitude out of range");
            None
        }
    }
}

/// Applies the cleaning rules to a freshly loaded table.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a raw table.
    ///
    /// Fill runs before date parsing so the `"Unknown"` sentinel is told apart
    /// from a malformed date. After cleaning `date_added` holds an ISO date or
    /// the sentinel, and `year_added` is an `Int32` column that is null exactly
    /// where no date could be parsed.
    pub fn clean(raw: DataFrame) -> Result<DataFrame, CleanerError> {
        let raw = Self::normalize_missing(raw)?;
        let raw_rows = raw.height();

        let fills: Vec<Expr> = SENTINEL_COLUMNS
            .iter()
            .map(|name| col(*name).fill_null(lit(UNKNOWN)))
            .collect();

        let essentials_present = ESSENTIAL_COLUMNS
            .iter()
            .map(|name| col(*name).is_not_null())
            .reduce(|acc, expr| acc.and(expr))
            .unwrap_or_else(|| lit(true));

        let mut df = raw
            .lazy()
            .with_columns(fills)
            .filter(essentials_present)
            .collect()?;

        let dropped = raw_rows - df.height();
        if dropped > 0 {
            info!(dropped, "Dropped rows missing rating or duration");
        }

        let (dates, years) = Self::parse_dates(&df)?;
        let unparsed = years.iter().filter(|year| year.is_none()).count();
        debug!(unparsed, "Rows without a usable date_added");

        df.with_column(Column::new(DATE_ADDED.into(), dates))?;
        df.with_column(Column::new(YEAR_ADDED.into(), years))?;

        info!(rows = df.height(), "Cleaned title table");
        Ok(df)
    }

    /// Turn blank and marker cells of every text column into nulls, so quoted
    /// empty fields are filled or dropped like unquoted ones.
    fn normalize_missing(raw: DataFrame) -> PolarsResult<DataFrame> {
        let mut normalized = 0usize;
        let columns = raw
            .get_columns()
            .iter()
            .map(|column| -> PolarsResult<Column> {
                if column.dtype() != &DataType::String {
                    return Ok(column.clone());
                }
                let values: Vec<Option<&str>> = column
                    .str()?
                    .into_iter()
                    .map(|value| match value {
                        Some(v) if is_missing(v) => {
                            normalized += 1;
                            None
                        }
                        other => other,
                    })
                    .collect();
                Ok(Column::new(column.name().clone(), values))
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        if normalized > 0 {
            debug!(normalized, "Blank or marker cells read as missing");
        }
        DataFrame::new(columns)
    }

    /// Normalized `date_added` strings and the matching `year_added` values.
    fn parse_dates(df: &DataFrame) -> PolarsResult<(Vec<String>, Vec<Option<i32>>)> {
        let parsed = df
            .column(DATE_ADDED)?
            .str()?
            .into_iter()
            .map(|raw| match raw.and_then(parse_date_added) {
                Some(date) => (date.format("%Y-%m-%d").to_string(), Some(date.year())),
                None => (UNKNOWN.to_string(), None),
            })
            .unzip();
        Ok(parsed)
    }
}
