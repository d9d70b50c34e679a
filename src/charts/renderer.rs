//! Static Chart Renderer
//! Writes the six dashboard charts as PNG files with plotters.
//!
//! Files:
//! 1. `type_distribution.png` - bars per type
//! 2. `additions_by_year.png` - grouped bars per year and type
//! 3. `top_countries.png`, `top_genres.png`, `top_directors.png` - horizontal bars
//! 4. `durations.png` - movie minutes histogram + density, season count bars

use crate::stats::{Aggregates, CategoryCount, DurationDistributions, YearlyAdditions};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw {chart}: {message}")]
    Drawing { chart: String, message: String },
}

type DrawResult = Result<(), Box<dyn std::error::Error>>;

const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
];
const HISTOGRAM_FILL: RGBColor = RGBColor(135, 206, 235);
const DENSITY_LINE: RGBColor = RGBColor(31, 119, 180);
const SEASON_FILL: RGBColor = RGBColor(250, 128, 114);
const COUNTRY_FILL: RGBColor = RGBColor(59, 82, 139);
const GENRE_FILL: RGBColor = RGBColor(180, 4, 38);
const DIRECTOR_FILL: RGBColor = RGBColor(140, 41, 129);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 26);

/// The six dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TypeDistribution,
    AdditionsByYear,
    TopCountries,
    TopGenres,
    TopDirectors,
    Durations,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::TypeDistribution,
        ChartKind::AdditionsByYear,
        ChartKind::TopCountries,
        ChartKind::TopGenres,
        ChartKind::TopDirectors,
        ChartKind::Durations,
    ];

    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::TypeDistribution => "type_distribution",
            ChartKind::AdditionsByYear => "additions_by_year",
            ChartKind::TopCountries => "top_countries",
            ChartKind::TopGenres => "top_genres",
            ChartKind::TopDirectors => "top_directors",
            ChartKind::Durations => "durations",
        }
    }

    /// Section heading shown above the chart.
    pub fn heading(self, top_n: usize) -> String {
        match self {
            ChartKind::TypeDistribution => "Content Type Distribution".to_string(),
            ChartKind::AdditionsByYear => "Content Added Over Time".to_string(),
            ChartKind::TopCountries => format!("Top {top_n} Countries"),
            ChartKind::TopGenres => format!("Top {top_n} Genres"),
            ChartKind::TopDirectors => format!("Top {top_n} Directors"),
            ChartKind::Durations => "Movie Durations vs TV Show Seasons".to_string(),
        }
    }

    /// Title drawn inside the chart.
    pub fn caption(self) -> &'static str {
        match self {
            ChartKind::TypeDistribution => "Movies vs TV Shows",
            ChartKind::AdditionsByYear => "Titles Added by Year",
            ChartKind::TopCountries => "Top Countries by Content",
            ChartKind::TopGenres => "Most Common Genres",
            ChartKind::TopDirectors => "Directors with Most Titles",
            ChartKind::Durations => "Movie Durations",
        }
    }
}

/// Headroom above the tallest bar.
fn y_limit(max: usize) -> f64 {
    (max.max(1) as f64) * 1.1
}

fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `dir`, returning the written paths.
    pub fn render_all(
        aggregates: &Aggregates,
        dir: &Path,
        size: (u32, u32),
    ) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let path = dir.join(format!("{}.png", kind.file_stem()));
            Self::render(kind, aggregates, &path, size).map_err(|e| RenderError::Drawing {
                chart: kind.file_stem().to_string(),
                message: e.to_string(),
            })?;
            written.push(path);
        }

        info!(dir = %dir.display(), charts = written.len(), "Rendered static charts");
        Ok(written)
    }

    fn render(kind: ChartKind, aggregates: &Aggregates, path: &Path, size: (u32, u32)) -> DrawResult {
        match kind {
            ChartKind::TypeDistribution => {
                Self::draw_type_distribution(path, size, &aggregates.type_distribution)
            }
            ChartKind::AdditionsByYear => {
                Self::draw_additions_by_year(path, size, &aggregates.additions_by_year)
            }
            ChartKind::TopCountries => Self::draw_ranked_counts(
                path,
                size,
                kind.caption(),
                &aggregates.top_countries,
                COUNTRY_FILL,
            ),
            ChartKind::TopGenres => Self::draw_ranked_counts(
                path,
                size,
                kind.caption(),
                &aggregates.top_genres,
                GENRE_FILL,
            ),
            ChartKind::TopDirectors => Self::draw_ranked_counts(
                path,
                size,
                kind.caption(),
                &aggregates.top_directors,
                DIRECTOR_FILL,
            ),
            // Two panels side by side, so wider than the rest.
            ChartKind::Durations => {
                Self::draw_durations(path, (size.0 * 7 / 5, size.1), &aggregates.durations)
            }
        }
    }

    fn draw_type_distribution(path: &Path, size: (u32, u32), counts: &[CategoryCount]) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();
        let max = counts.iter().map(|c| c.count).fold(0, usize::max);
        let n = counts.len().max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::TypeDistribution.caption(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..y_limit(max))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(counts.len().max(1))
            .x_label_formatter(&|v| category_label(&labels, *v))
            .x_desc("type")
            .y_desc("count")
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let x = i as f64;
            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, c.count as f64)], color.filled())
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_additions_by_year(path: &Path, size: (u32, u32), additions: &YearlyAdditions) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = additions.years.iter().map(|y| y.to_string()).collect();
        let n = additions.years.len().max(1) as f64;
        let series_count = additions.series.len().max(1);
        let bar_width = 0.8 / series_count as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::AdditionsByYear.caption(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..y_limit(additions.max_count()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(additions.years.len().max(1))
            .x_label_formatter(&|v| category_label(&labels, *v))
            .x_desc("year_added")
            .y_desc("count")
            .draw()?;

        for (s, series) in additions.series.iter().enumerate() {
            let color = SERIES_COLORS[s % SERIES_COLORS.len()];
            let offset = (s as f64 - (series_count as f64 - 1.0) / 2.0) * bar_width;
            chart
                .draw_series(series.counts.iter().enumerate().map(|(i, &count)| {
                    let x = i as f64 + offset;
                    Rectangle::new(
                        [(x - bar_width / 2.0, 0.0), (x + bar_width / 2.0, count as f64)],
                        color.filled(),
                    )
                }))?
                .label(series.type_name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn draw_ranked_counts(
        path: &Path,
        size: (u32, u32),
        caption: &str,
        counts: &[CategoryCount],
        fill: RGBColor,
    ) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let n = counts.len();
        // Largest count at the top of the axis.
        let labels: Vec<String> = counts.iter().rev().map(|c| c.label.clone()).collect();
        let max = counts.iter().map(|c| c.count).fold(0, usize::max);

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(0f64..y_limit(max), -0.5f64..n.max(1) as f64 - 0.5)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&|v| category_label(&labels, *v))
            .x_desc("Count")
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(rank, c)| {
            let y = (n - 1 - rank) as f64;
            Rectangle::new([(0.0, y - 0.35), (c.count as f64, y + 0.35)], fill.filled())
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_durations(path: &Path, size: (u32, u32), durations: &DurationDistributions) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        let (left, right) = root.split_horizontally((size.0 / 2) as i32);

        Self::draw_movie_histogram(&left, durations)?;
        Self::draw_season_bars(&right, durations)?;

        root.present()?;
        Ok(())
    }

    fn draw_movie_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        durations: &DurationDistributions,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let hist = &durations.movie_histogram;
        let (x_min, x_max) = match (hist.bins.first(), hist.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let peak = hist
            .density
            .iter()
            .map(|&(_, d)| d)
            .fold(hist.max_count() as f64, f64::max);

        let mut chart = ChartBuilder::on(area)
            .caption(ChartKind::Durations.caption(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..peak.max(1.0) * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("Minutes")
            .y_desc("Count")
            .draw()?;

        chart.draw_series(hist.bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], HISTOGRAM_FILL.filled())
        }))?;

        if !hist.density.is_empty() {
            chart.draw_series(LineSeries::new(
                hist.density.iter().copied(),
                DENSITY_LINE.stroke_width(2),
            ))?;
        }
        Ok(())
    }

    fn draw_season_bars<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        durations: &DurationDistributions,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let labels: Vec<String> = durations
            .season_counts
            .iter()
            .map(|s| s.seasons.to_string())
            .collect();
        let n = durations.season_counts.len().max(1) as f64;
        let max = durations
            .season_counts
            .iter()
            .map(|s| s.count)
            .fold(0, usize::max);

        let mut chart = ChartBuilder::on(area)
            .caption("TV Show Seasons", CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..y_limit(max))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(durations.season_counts.len().max(1))
            .x_label_formatter(&|v| category_label(&labels, *v))
            .x_desc("Seasons")
            .y_desc("Number of Shows")
            .draw()?;

        chart.draw_series(durations.season_counts.iter().enumerate().map(|(i, s)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, s.count as f64)], SEASON_FILL.filled())
        }))?;
        Ok(())
    }
}
