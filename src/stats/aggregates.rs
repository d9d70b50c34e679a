//! Aggregates Module
//! Group-by/count computations behind the six dashboard charts.

use super::distribution::{DistributionCalculator, Histogram};
use crate::data::{
    extract_leading_int, COUNTRY, DIRECTOR, DURATION, LISTED_IN, MOVIE, TV_SHOW, TYPE, UNKNOWN,
    YEAR_ADDED,
};
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One bar of a categorical count chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts for one type across every year in [`YearlyAdditions::years`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSeries {
    pub type_name: String,
    pub counts: Vec<usize>,
}

/// Titles added per year, one series per type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearlyAdditions {
    pub years: Vec<i32>,
    pub series: Vec<TypeSeries>,
}

impl YearlyAdditions {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn count(&self, year: i32, type_name: &str) -> usize {
        let Some(idx) = self.years.iter().position(|y| *y == year) else {
            return 0;
        };
        self.series
            .iter()
            .find(|s| s.type_name == type_name)
            .map(|s| s.counts[idx])
            .unwrap_or(0)
    }

    pub fn max_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .fold(0, usize::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonCount {
    pub seasons: u64,
    pub count: usize,
}

/// Movie runtimes and TV season counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DurationDistributions {
    pub movie_minutes: Vec<f64>,
    pub movie_histogram: Histogram,
    pub season_counts: Vec<SeasonCount>,
}

/// Knobs shared by the top-N and histogram steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSettings {
    pub top_n: usize,
    pub histogram_bins: usize,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            histogram_bins: 30,
        }
    }
}

/// Results of the six aggregation steps over one filtered table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregates {
    pub type_distribution: Vec<CategoryCount>,
    pub additions_by_year: YearlyAdditions,
    pub top_countries: Vec<CategoryCount>,
    pub top_genres: Vec<CategoryCount>,
    pub top_directors: Vec<CategoryCount>,
    pub durations: DurationDistributions,
}

/// Count occurrences and keep the `n` most frequent.
///
/// Sorting is stable over first-appearance order, so equal counts keep the
/// order in which their labels were first seen.
pub fn top_n<'a, I>(tokens: I, n: usize) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = ordered_counts(tokens);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Occurrence counts in first-appearance order.
fn ordered_counts<'a, I>(tokens: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for token in tokens {
        match index.get(token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(CategoryCount::new(token, 1));
            }
        }
    }
    counts
}

/// Split comma-separated cells into trimmed, non-empty tokens.
pub fn split_list<'a, I>(cells: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    cells
        .into_iter()
        .flatten()
        .flat_map(|cell| cell.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Computes the dashboard aggregates from a cleaned, filtered table.
pub struct AggregateCalculator;

impl AggregateCalculator {
    pub fn compute_all(df: &DataFrame, settings: &AggregateSettings) -> PolarsResult<Aggregates> {
        Ok(Aggregates {
            type_distribution: Self::type_distribution(df)?,
            additions_by_year: Self::additions_by_year(df)?,
            top_countries: Self::top_list_values(df, COUNTRY, settings.top_n)?,
            top_genres: Self::top_list_values(df, LISTED_IN, settings.top_n)?,
            top_directors: Self::top_directors(df, settings.top_n)?,
            durations: Self::duration_distributions(df, settings.histogram_bins)?,
        })
    }

    /// Rows per type, in first-appearance order.
    pub fn type_distribution(df: &DataFrame) -> PolarsResult<Vec<CategoryCount>> {
        let types = df.column(TYPE)?.str()?;
        Ok(ordered_counts(types.into_iter().flatten()))
    }

    /// Rows per (year_added, type); rows without a year are skipped.
    pub fn additions_by_year(df: &DataFrame) -> PolarsResult<YearlyAdditions> {
        let types = df.column(TYPE)?.str()?;
        let years = df.column(YEAR_ADDED)?.i32()?;

        let mut type_order: Vec<&str> = Vec::new();
        let mut year_set: BTreeSet<i32> = BTreeSet::new();
        let mut cells: BTreeMap<(i32, &str), usize> = BTreeMap::new();

        for (type_name, year) in types.into_iter().zip(years.into_iter()) {
            let (Some(type_name), Some(year)) = (type_name, year) else {
                continue;
            };
            if !type_order.contains(&type_name) {
                type_order.push(type_name);
            }
            year_set.insert(year);
            *cells.entry((year, type_name)).or_default() += 1;
        }

        let years: Vec<i32> = year_set.into_iter().collect();
        let series = type_order
            .iter()
            .map(|type_name| TypeSeries {
                type_name: type_name.to_string(),
                counts: years
                    .iter()
                    .map(|year| cells.get(&(*year, *type_name)).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        Ok(YearlyAdditions { years, series })
    }

    /// Top values of a comma-separated list column (countries, genres).
    pub fn top_list_values(
        df: &DataFrame,
        column: &str,
        n: usize,
    ) -> PolarsResult<Vec<CategoryCount>> {
        let cells = df.column(column)?.str()?;
        Ok(top_n(split_list(cells), n))
    }

    /// Most frequent directors, ignoring the sentinel.
    pub fn top_directors(df: &DataFrame, n: usize) -> PolarsResult<Vec<CategoryCount>> {
        let directors = df.column(DIRECTOR)?.str()?;
        Ok(top_n(
            directors.into_iter().flatten().filter(|d| *d != UNKNOWN),
            n,
        ))
    }

    /// Movie minutes (with histogram) and TV season counts.
    pub fn duration_distributions(
        df: &DataFrame,
        histogram_bins: usize,
    ) -> PolarsResult<DurationDistributions> {
        let types = df.column(TYPE)?.str()?;
        let durations = df.column(DURATION)?.str()?;

        let mut movie_minutes: Vec<f64> = Vec::new();
        let mut seasons: BTreeMap<u64, usize> = BTreeMap::new();

        for (type_name, duration) in types.into_iter().zip(durations.into_iter()) {
            let Some(value) = duration.and_then(extract_leading_int) else {
                continue;
            };
            match type_name {
                Some(MOVIE) => movie_minutes.push(value as f64),
                Some(TV_SHOW) => *seasons.entry(value).or_default() += 1,
                _ => {}
            }
        }

        let movie_histogram = DistributionCalculator::histogram(&movie_minutes, histogram_bins);
        let season_counts = seasons
            .into_iter()
            .map(|(seasons, count)| SeasonCount { seasons, count })
            .collect();

        Ok(DurationDistributions {
            movie_minutes,
            movie_histogram,
            season_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned_frame() -> DataFrame {
        df!(
            "type" => ["Movie", "TV Show", "Movie", "TV Show", "Movie"],
            "director" => ["Jane Doe", "Unknown", "Kim Lee", "Unknown", "Kim Lee"],
            "country" => ["India, USA", "USA", "India", "Unknown", "Cambodia,"],
            "listed_in" => ["Dramas, International Movies", "TV Dramas", "Dramas", "Kids' TV", "Comedies"],
            "duration" => ["90 min", "3 Seasons", "two hours", "1 Season", "120 min"],
            "year_added" => [Some(2020i32), None, Some(2019), Some(2020), Some(2020)],
        )
        .unwrap()
    }

    #[test]
    fn top_n_breaks_ties_by_first_appearance() {
        let tokens = ["b", "a", "c", "a", "b", "d"];
        let top = top_n(tokens, 3);

        assert_eq!(
            top,
            vec![
                CategoryCount::new("b", 2),
                CategoryCount::new("a", 2),
                CategoryCount::new("c", 1),
            ]
        );
    }

    #[test]
    fn top_n_never_exceeds_limit() {
        let labels: Vec<String> = (0..25).map(|i| format!("g{i}")).collect();
        let top = top_n(labels.iter().map(String::as_str), 10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn split_list_trims_and_skips_empty_tokens() {
        let cells = [Some("India, USA"), None, Some("Cambodia,"), Some(" France ")];
        let tokens: Vec<&str> = split_list(cells).collect();
        assert_eq!(tokens, vec!["India", "USA", "Cambodia", "France"]);
    }

    #[test]
    fn countries_are_split_and_counted() {
        let top = AggregateCalculator::top_list_values(&cleaned_frame(), "country", 10).unwrap();

        assert_eq!(top[0], CategoryCount::new("India", 2));
        assert_eq!(top[1], CategoryCount::new("USA", 2));
        assert!(top.contains(&CategoryCount::new("Unknown", 1)));
        assert!(top.contains(&CategoryCount::new("Cambodia", 1)));
    }

    #[test]
    fn genres_are_split_and_counted() {
        let top = AggregateCalculator::top_list_values(&cleaned_frame(), "listed_in", 2).unwrap();
        assert_eq!(
            top,
            vec![
                CategoryCount::new("Dramas", 2),
                CategoryCount::new("International Movies", 1),
            ]
        );
    }

    #[test]
    fn directors_exclude_sentinel() {
        let top = AggregateCalculator::top_directors(&cleaned_frame(), 10).unwrap();
        assert_eq!(
            top,
            vec![
                CategoryCount::new("Kim Lee", 2),
                CategoryCount::new("Jane Doe", 1),
            ]
        );
    }

    #[test]
    fn type_distribution_counts_rows() {
        let counts = AggregateCalculator::type_distribution(&cleaned_frame()).unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount::new("Movie", 3),
                CategoryCount::new("TV Show", 2),
            ]
        );
    }

    #[test]
    fn additions_skip_rows_without_year() {
        let additions = AggregateCalculator::additions_by_year(&cleaned_frame()).unwrap();

        assert_eq!(additions.years, vec![2019, 2020]);
        assert_eq!(additions.count(2020, "Movie"), 2);
        assert_eq!(additions.count(2020, "TV Show"), 1);
        assert_eq!(additions.count(2019, "Movie"), 1);
        assert_eq!(additions.count(2019, "TV Show"), 0);
        assert_eq!(additions.max_count(), 2);
    }

    #[test]
    fn durations_skip_values_without_leading_integer() {
        let durations = AggregateCalculator::duration_distributions(&cleaned_frame(), 30).unwrap();

        assert_eq!(durations.movie_minutes, vec![90.0, 120.0]);
        assert_eq!(durations.movie_histogram.total(), 2);
        assert_eq!(
            durations.season_counts,
            vec![
                SeasonCount { seasons: 1, count: 1 },
                SeasonCount { seasons: 3, count: 1 },
            ]
        );
    }

    #[test]
    fn empty_frame_yields_empty_aggregates() {
        let df = cleaned_frame().head(Some(0));
        let aggregates = AggregateCalculator::compute_all(&df, &AggregateSettings::default()).unwrap();

        assert!(aggregates.type_distribution.is_empty());
        assert!(aggregates.additions_by_year.is_empty());
        assert!(aggregates.top_countries.is_empty());
        assert!(aggregates.durations.movie_minutes.is_empty());
    }
}
