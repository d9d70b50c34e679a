//! Load → clean → filter → aggregate, as one call per run.

use crate::data::{CleanerError, DataCleaner, DataLoader, LoaderError, TypeFilter, TYPE};
use crate::stats::{AggregateCalculator, AggregateSettings, Aggregates};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Cleaner(#[from] CleanerError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub selection: TypeFilter,
    /// Distinct types of the cleaned, unfiltered table.
    pub type_options: Vec<String>,
    /// Row count after cleaning, before filtering.
    pub cleaned_rows: usize,
    /// Cleaned table after the type filter.
    pub table: DataFrame,
    pub aggregates: Aggregates,
}

/// Clean, filter and aggregate an already loaded table.
pub fn analyze(
    raw: DataFrame,
    selection: &TypeFilter,
    settings: &AggregateSettings,
) -> Result<Analysis, PipelineError> {
    let cleaned = DataCleaner::clean(raw)?;
    let type_options = DataLoader::distinct_values(&cleaned, TYPE)?;
    let table = selection.apply(&cleaned)?;
    let aggregates = AggregateCalculator::compute_all(&table, settings)?;

    info!(
        selection = %selection,
        cleaned_rows = cleaned.height(),
        filtered_rows = table.height(),
        "Computed dashboard aggregates"
    );

    Ok(Analysis {
        selection: selection.clone(),
        type_options,
        cleaned_rows: cleaned.height(),
        table,
        aggregates,
    })
}

/// Full run from the source file on disk. Nothing is cached between calls.
pub fn run(
    source: &Path,
    selection: &TypeFilter,
    settings: &AggregateSettings,
) -> Result<Analysis, PipelineError> {
    let raw = DataLoader::load_csv(source)?;
    analyze(raw, selection, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        df!(
            "type" => [Some("Movie"), Some("TV Show"), Some("Movie")],
            "director" => [None, Some("Ann Lee"), None],
            "cast" => [Some("A"), None, Some("C")],
            "country" => [Some("India, USA"), None, Some("USA")],
            "date_added" => [Some("January 1, 2020"), None, Some("March 3, 2021")],
            "release_year" => [Some("2019"), Some("2020"), Some("2021")],
            "rating" => [Some("PG"), Some("TV-14"), None],
            "duration" => [Some("90 min"), Some("2 Seasons"), Some("80 min")],
            "listed_in" => [Some("Dramas"), Some("TV Comedies"), Some("Dramas")],
        )
        .unwrap()
    }

    #[test]
    fn all_selection_uses_every_cleaned_row() {
        let analysis =
            analyze(raw_frame(), &TypeFilter::All, &AggregateSettings::default()).unwrap();

        assert_eq!(analysis.cleaned_rows, 2);
        assert_eq!(analysis.table.height(), 2);
        assert_eq!(analysis.type_options, vec!["Movie", "TV Show"]);
    }

    #[test]
    fn type_selection_narrows_every_aggregate() {
        let analysis = analyze(
            raw_frame(),
            &TypeFilter::Only("Movie".into()),
            &AggregateSettings::default(),
        )
        .unwrap();

        assert_eq!(analysis.cleaned_rows, 2);
        assert_eq!(analysis.table.height(), 1);
        assert_eq!(analysis.type_options, vec!["Movie", "TV Show"]);
        assert_eq!(analysis.aggregates.type_distribution.len(), 1);
        assert!(analysis.aggregates.durations.season_counts.is_empty());
        assert_eq!(analysis.aggregates.durations.movie_minutes, vec![90.0]);
    }
}
