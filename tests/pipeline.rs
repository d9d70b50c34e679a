use chartify_titles::data::{DataCleaner, DataLoader, DataWriter, LoaderError, TypeFilter, UNKNOWN};
use chartify_titles::pipeline::{self, PipelineError};
use chartify_titles::stats::{AggregateSettings, CategoryCount, SeasonCount};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SOURCE_CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in
s1,Movie,Alpha,Jane Doe,,\"India, USA\",\"January 1, 2020\",2019,PG,90 min,\"Dramas, International Movies\"
s2,TV Show,Beta,,Ann,USA,,2021,TV-MA,3 Seasons,\"TV Dramas, International TV Shows\"
s3,Movie,Gamma,Jane Doe,Bob,,not a date,2018,,100 min,Comedies
s4,Movie,Delta,,Cy,India,\" August 4, 2017\",2017,R,two hours,Dramas
";

fn write_source(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("titles.csv");
    fs::write(&path, SOURCE_CSV).unwrap();
    path
}

fn text(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(row)
        .map(str::to_string)
}

#[test]
fn cleaning_applies_sentinels_and_drops_rows_without_rating() {
    let dir = tempdir().unwrap();
    let source = write_source(dir.path());

    let analysis = pipeline::run(&source, &TypeFilter::All, &AggregateSettings::default()).unwrap();
    let table = &analysis.table;

    // s3 has no rating.
    assert_eq!(analysis.cleaned_rows, 3);
    assert_eq!(table.height(), 3);
    assert_eq!(text(table, "show_id", 1).as_deref(), Some("s2"));
    assert_eq!(text(table, "show_id", 2).as_deref(), Some("s4"));

    for column in ["director", "cast", "country", "date_added", "rating", "duration"] {
        assert_eq!(table.column(column).unwrap().null_count(), 0, "{column}");
    }

    // s2 had no date_added: sentinel kept, year absent, row retained.
    assert_eq!(text(table, "director", 1).as_deref(), Some(UNKNOWN));
    assert_eq!(text(table, "date_added", 1).as_deref(), Some(UNKNOWN));

    let years = table.column("year_added").unwrap().i32().unwrap();
    assert_eq!(years.get(0), Some(2020));
    assert_eq!(years.get(1), None);
    assert_eq!(years.get(2), Some(2017));
}

#[test]
fn aggregates_match_the_example_rows() {
    let dir = tempdir().unwrap();
    let source = write_source(dir.path());

    let analysis = pipeline::run(&source, &TypeFilter::All, &AggregateSettings::default()).unwrap();
    let aggregates = &analysis.aggregates;

    assert_eq!(
        aggregates.top_countries,
        vec![CategoryCount::new("India", 2), CategoryCount::new("USA", 2)]
    );
    assert_eq!(aggregates.top_genres[0], CategoryCount::new("Dramas", 2));
    assert_eq!(aggregates.top_directors, vec![CategoryCount::new("Jane Doe", 1)]);
    assert_eq!(
        aggregates.type_distribution,
        vec![CategoryCount::new("Movie", 2), CategoryCount::new("TV Show", 1)]
    );

    // "two hours" has no leading integer.
    assert_eq!(aggregates.durations.movie_minutes, vec![90.0]);
    assert_eq!(
        aggregates.durations.season_counts,
        vec![SeasonCount { seasons: 3, count: 1 }]
    );

    assert_eq!(aggregates.additions_by_year.years, vec![2017, 2020]);
    assert_eq!(aggregates.additions_by_year.count(2020, "Movie"), 1);
    assert_eq!(aggregates.additions_by_year.count(2020, "TV Show"), 0);
    assert_eq!(analysis.type_options, vec!["Movie", "TV Show"]);
}

#[test]
fn type_filter_restricts_every_row() {
    let dir = tempdir().unwrap();
    let source = write_source(dir.path());

    let analysis = pipeline::run(
        &source,
        &TypeFilter::Only("TV Show".into()),
        &AggregateSettings::default(),
    )
    .unwrap();

    assert_eq!(analysis.cleaned_rows, 3);
    assert_eq!(analysis.table.height(), 1);
    assert_eq!(text(&analysis.table, "type", 0).as_deref(), Some("TV Show"));
    assert!(analysis.aggregates.durations.movie_minutes.is_empty());
    assert_eq!(analysis.aggregates.top_countries, vec![CategoryCount::new("USA", 1)]);
}

#[test]
fn cleaned_file_reloads_with_same_rows_and_years() {
    let dir = tempdir().unwrap();
    let source = write_source(dir.path());
    let cleaned_path = dir.path().join("out").join("cleaned.csv");

    let mut analysis =
        pipeline::run(&source, &TypeFilter::All, &AggregateSettings::default()).unwrap();
    DataWriter::write_csv(&mut analysis.table, &cleaned_path).unwrap();

    let written = fs::read_to_string(&cleaned_path).unwrap();
    assert!(written.lines().next().unwrap().ends_with("year_added"));

    let reloaded = DataCleaner::clean(DataLoader::load_csv(&cleaned_path).unwrap()).unwrap();
    assert_eq!(reloaded.height(), analysis.table.height());

    for column in ["director", "cast", "country", "date_added"] {
        for row in 0..reloaded.height() {
            assert_eq!(
                text(&reloaded, column, row),
                text(&analysis.table, column, row),
                "{column} row {row}"
            );
        }
    }

    let before = analysis.table.column("year_added").unwrap().i32().unwrap();
    let after = reloaded.column("year_added").unwrap().i32().unwrap();
    assert_eq!(
        before.into_iter().collect::<Vec<_>>(),
        after.into_iter().collect::<Vec<_>>()
    );
}

#[test]
fn writer_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let source = write_source(dir.path());
    let cleaned_path = dir.path().join("cleaned.csv");
    fs::write(&cleaned_path, "stale contents\n").unwrap();

    let mut analysis = pipeline::run(
        &source,
        &TypeFilter::Only("Movie".into()),
        &AggregateSettings::default(),
    )
    .unwrap();
    DataWriter::write_csv(&mut analysis.table, &cleaned_path).unwrap();

    let written = fs::read_to_string(&cleaned_path).unwrap();
    assert!(!written.contains("stale"));
    // Header plus the two movies.
    assert_eq!(written.lines().count(), 3);
    assert_eq!(
        DataWriter::acknowledgment(&cleaned_path),
        format!("Cleaned data saved as {}", cleaned_path.display())
    );
}

#[test]
fn missing_source_is_fatal() {
    let dir = tempdir().unwrap();
    let err = pipeline::run(
        &dir.path().join("absent.csv"),
        &TypeFilter::All,
        &AggregateSettings::default(),
    )
    .unwrap_err();

    assert!(matches!(err, PipelineError::Loader(LoaderError::NotFound(_))));
}

#[test]
fn source_without_required_column_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "type,director\nMovie,Someone\n").unwrap();

    let err = DataLoader::load_csv(&path).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn("cast")));
}

#[test]
fn quoted_blank_cells_are_treated_as_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quoted.csv");
    fs::write(
        &path,
        "\
type,director,cast,country,date_added,release_year,rating,duration,listed_in
Movie,\"\",NA,,\"January 1, 2020\",2020,PG,90 min,Dramas
Movie,Kim Lee,Cy,India,\"March 3, 2021\",2021,\"\",100 min,Dramas
",
    )
    .unwrap();

    let cleaned = DataCleaner::clean(DataLoader::load_csv(&path).unwrap()).unwrap();

    assert_eq!(cleaned.height(), 1);
    assert_eq!(text(&cleaned, "director", 0).as_deref(), Some(UNKNOWN));
    assert_eq!(text(&cleaned, "cast", 0).as_deref(), Some(UNKNOWN));
    assert_eq!(text(&cleaned, "country", 0).as_deref(), Some(UNKNOWN));
    assert_eq!(text(&cleaned, "rating", 0).as_deref(), Some("PG"));
}
