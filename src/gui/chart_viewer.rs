//! Chart Viewer Widget
//! Central scrollable panel showing the six charts of the last run.

use crate::charts::{ChartKind, ChartPlotter};
use crate::pipeline::Analysis;
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;

/// Scrollable chart display area, one card per chart.
pub struct ChartViewer {
    analysis: Option<Analysis>,
    acknowledgment: Option<String>,
    top_n: usize,
}

impl ChartViewer {
    pub fn new(top_n: usize) -> Self {
        Self {
            analysis: None,
            acknowledgment: None,
            top_n,
        }
    }

    pub fn clear(&mut self) {
        self.analysis = None;
        self.acknowledgment = None;
    }

    /// Replace the displayed run.
    pub fn set_analysis(&mut self, analysis: Analysis, acknowledgment: String) {
        self.analysis = Some(analysis);
        self.acknowledgment = Some(acknowledgment);
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("📺 Netflix Titles - EDA Dashboard").size(24.0).strong());
        ui.add_space(8.0);

        let Some(analysis) = &self.analysis else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.label(
            RichText::new(format!(
                "Showing {} of {} cleaned titles (type: {})",
                analysis.table.height(),
                analysis.cleaned_rows,
                analysis.selection
            ))
            .color(Color32::GRAY),
        );
        ui.add_space(CHART_SPACING);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for kind in ChartKind::ALL {
                    self.draw_chart_card(ui, kind, analysis);
                    ui.add_space(CHART_SPACING);
                }

                if let Some(ack) = &self.acknowledgment {
                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(Color32::from_rgb(212, 237, 218))
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(format!("✅ {ack}"))
                                    .size(14.0)
                                    .color(Color32::from_rgb(21, 87, 36)),
                            );
                        });
                }
            });
    }

    fn draw_chart_card(&self, ui: &mut egui::Ui, kind: ChartKind, analysis: &Analysis) {
        let aggregates = &analysis.aggregates;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(kind.heading(self.top_n)).size(18.0).strong());
                ui.add_space(8.0);

                match kind {
                    ChartKind::TypeDistribution => {
                        ChartPlotter::draw_type_distribution(ui, &aggregates.type_distribution)
                    }
                    ChartKind::AdditionsByYear => {
                        ChartPlotter::draw_additions_by_year(ui, &aggregates.additions_by_year)
                    }
                    ChartKind::TopCountries => ChartPlotter::draw_ranked_counts(
                        ui,
                        "top_countries",
                        "Country",
                        &aggregates.top_countries,
                    ),
                    ChartKind::TopGenres => ChartPlotter::draw_ranked_counts(
                        ui,
                        "top_genres",
                        "Genre",
                        &aggregates.top_genres,
                    ),
                    ChartKind::TopDirectors => ChartPlotter::draw_ranked_counts(
                        ui,
                        "top_directors",
                        "Director",
                        &aggregates.top_directors,
                    ),
                    ChartKind::Durations => {
                        ui.columns(2, |columns| {
                            columns[0].label(RichText::new("Movie Durations").size(14.0).strong());
                            ChartPlotter::draw_movie_durations(&mut columns[0], &aggregates.durations);
                            columns[1].label(RichText::new("TV Show Seasons").size(14.0).strong());
                            ChartPlotter::draw_season_counts(&mut columns[1], &aggregates.durations);
                        });
                    }
                }
            });
    }
}
