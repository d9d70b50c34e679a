//! Type filter applied between cleaning and aggregation.

use super::TYPE;
use polars::prelude::*;
use std::fmt;

/// Label shown for the pass-through selection.
pub const ALL_LABEL: &str = "All";

/// Selection made in the sidebar (or passed on the command line).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    /// Map a selection label to a filter; `"All"` passes every row.
    pub fn from_selection(selection: &str) -> Self {
        if selection == ALL_LABEL {
            TypeFilter::All
        } else {
            TypeFilter::Only(selection.to_string())
        }
    }

    /// Options for the selection control: `All` followed by the known types.
    pub fn options(types: &[String]) -> Vec<TypeFilter> {
        std::iter::once(TypeFilter::All)
            .chain(types.iter().cloned().map(TypeFilter::Only))
            .collect()
    }

    pub fn apply(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        match self {
            TypeFilter::All => Ok(df.clone()),
            TypeFilter::Only(value) => df
                .clone()
                .lazy()
                .filter(col(TYPE).eq(lit(value.as_str())))
                .collect(),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL_LABEL),
            TypeFilter::Only(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "type" => ["Movie", "TV Show", "Movie"],
            "title" => ["a", "b", "c"],
        )
        .unwrap()
    }

    #[test]
    fn all_is_identity() {
        let df = frame();
        let filtered = TypeFilter::All.apply(&df).unwrap();
        assert!(filtered.equals(&df));
    }

    #[test]
    fn only_keeps_matching_rows() {
        let filtered = TypeFilter::Only("Movie".into()).apply(&frame()).unwrap();

        assert_eq!(filtered.height(), 2);
        let types = filtered.column("type").unwrap().str().unwrap();
        assert!(types.into_iter().all(|t| t == Some("Movie")));
    }

    #[test]
    fn unknown_type_yields_empty_frame() {
        let filtered = TypeFilter::Only("Podcast".into()).apply(&frame()).unwrap();
        assert_eq!(filtered.height(), 0);
    }

    #[test]
    fn selection_labels_round_trip() {
        assert_eq!(TypeFilter::from_selection("All"), TypeFilter::All);
        assert_eq!(
            TypeFilter::from_selection("TV Show"),
            TypeFilter::Only("TV Show".into())
        );
        assert_eq!(TypeFilter::Only("TV Show".into()).to_string(), "TV Show");

        let options = TypeFilter::options(&["Movie".to_string()]);
        assert_eq!(options, vec![TypeFilter::All, TypeFilter::Only("Movie".into())]);
    }
}
