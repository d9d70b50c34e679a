//! Chart Plotter Module
//! Draws the six dashboard charts with egui_plot.

use crate::stats::{CategoryCount, DurationDistributions, YearlyAdditions};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

/// Color palette for series
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(102, 194, 165), // Teal
    Color32::from_rgb(252, 141, 98),  // Orange
    Color32::from_rgb(141, 160, 203), // Lavender
    Color32::from_rgb(231, 138, 195), // Pink
    Color32::from_rgb(166, 216, 84),  // Lime
    Color32::from_rgb(255, 217, 47),  // Yellow
    Color32::from_rgb(229, 196, 148), // Sand
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // Sky blue
pub const DENSITY_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const SEASON_COLOR: Color32 = Color32::from_rgb(250, 128, 114); // Salmon

const CHART_HEIGHT: f32 = 300.0;

/// Label for a categorical axis mark, empty between categories.
pub fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Draws dashboard charts into egui.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn no_data(ui: &mut egui::Ui) {
        ui.label(RichText::new("No data for this selection").color(Color32::GRAY));
    }

    /// Bar per type ("Movies vs TV Shows").
    pub fn draw_type_distribution(ui: &mut egui::Ui, counts: &[CategoryCount]) {
        if counts.is_empty() {
            Self::no_data(ui);
            return;
        }

        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();
        let charts: Vec<BarChart> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let color = Self::series_color(i);
                BarChart::new(vec![Bar::new(i as f64, c.count as f64)
                    .width(0.6)
                    .name(&c.label)
                    .fill(color)])
                .color(color)
                .name(&c.label)
            })
            .collect();

        Plot::new("type_distribution")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("type")
            .y_axis_label("count")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Grouped bars per year, one series per type.
    pub fn draw_additions_by_year(ui: &mut egui::Ui, additions: &YearlyAdditions) {
        if additions.is_empty() {
            Self::no_data(ui);
            return;
        }

        let labels: Vec<String> = additions.years.iter().map(|y| y.to_string()).collect();
        let series_count = additions.series.len().max(1);
        let bar_width = 0.8 / series_count as f64;

        let charts: Vec<BarChart> = additions
            .series
            .iter()
            .enumerate()
            .map(|(s, series)| {
                let color = Self::series_color(s);
                let offset = (s as f64 - (series_count as f64 - 1.0) / 2.0) * bar_width;
                let bars = series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(i as f64 + offset, count as f64)
                            .width(bar_width)
                            .fill(color)
                    })
                    .collect();
                BarChart::new(bars).color(color).name(&series.type_name)
            })
            .collect();

        Plot::new("additions_by_year")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("year_added")
            .y_axis_label("count")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Horizontal bars, largest count on top.
    pub fn draw_ranked_counts(
        ui: &mut egui::Ui,
        id: &str,
        axis_label: &str,
        counts: &[CategoryCount],
    ) {
        if counts.is_empty() {
            Self::no_data(ui);
            return;
        }

        let n = counts.len();
        // Row 0 is drawn at the bottom, so reverse the ranking.
        let labels: Vec<String> = counts.iter().rev().map(|c| c.label.clone()).collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(rank, c)| {
                Bar::new((n - 1 - rank) as f64, c.count as f64)
                    .width(0.7)
                    .name(&c.label)
                    .fill(Self::series_color(rank))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .x_axis_label("Count")
            .y_axis_label(axis_label)
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name(id));
            });
    }

    /// Movie minutes histogram with its density overlay.
    pub fn draw_movie_durations(ui: &mut egui::Ui, durations: &DurationDistributions) {
        let hist = &durations.movie_histogram;
        if hist.bins.is_empty() {
            Self::no_data(ui);
            return;
        }

        let bars: Vec<Bar> = hist
            .bins
            .iter()
            .map(|bin| {
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width(bin.end - bin.start)
                    .fill(HISTOGRAM_COLOR)
            })
            .collect();
        let density: PlotPoints = hist.density.iter().map(|&(x, y)| [x, y]).collect();
        let has_density = !hist.density.is_empty();

        Plot::new("movie_durations")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Minutes")
            .y_axis_label("Count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_COLOR).name("Movies"));
                if has_density {
                    plot_ui.line(Line::new(density).color(DENSITY_COLOR).width(2.0).name("Density"));
                }
            });
    }

    /// Number of shows per season count.
    pub fn draw_season_counts(ui: &mut egui::Ui, durations: &DurationDistributions) {
        if durations.season_counts.is_empty() {
            Self::no_data(ui);
            return;
        }

        let labels: Vec<String> = durations
            .season_counts
            .iter()
            .map(|s| s.seasons.to_string())
            .collect();
        let bars: Vec<Bar> = durations
            .season_counts
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Bar::new(i as f64, s.count as f64)
                    .width(0.8)
                    .fill(SEASON_COLOR)
            })
            .collect();

        Plot::new("season_counts")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Seasons")
            .y_axis_label("Number of Shows")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(SEASON_COLOR).name("TV Shows"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_whole_marks() {
        let labels = vec!["Movie".to_string(), "TV Show".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Movie");
        assert_eq!(category_label(&labels, 1.0), "TV Show");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
