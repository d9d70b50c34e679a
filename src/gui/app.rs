//! Chartify Titles Main Application
//! Main window with the filter sidebar and the chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{DataWriter, TypeFilter};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{self, Analysis};
use crate::stats::AggregateSettings;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// Pipeline result from background thread
enum RunResult {
    Complete {
        analysis: Box<Analysis>,
        acknowledgment: String,
    },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // One run in flight at a time
    run_rx: Option<Receiver<RunResult>>,
    is_running: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(config.source_path.clone()),
            chart_viewer: ChartViewer::new(config.top_n),
            config,
            run_rx: None,
            is_running: false,
        };
        app.start_run();
        app
    }

    /// Re-run the whole pipeline from disk with the current selection.
    fn start_run(&mut self) {
        if self.is_running {
            return;
        }

        let source = self.control_panel.settings.source_path.clone();
        let selection = self.control_panel.settings.selection.clone();
        let cleaned_path = self.config.cleaned_path.clone();
        let settings = self.config.aggregate_settings();

        let (tx, rx) = channel();
        self.run_rx = Some(rx);
        self.is_running = true;
        self.control_panel.set_status("Loading data...");
        info!(source = %source.display(), %selection, "Starting dashboard run");

        thread::spawn(move || {
            let result = match Self::run_once(&source, &selection, &settings, &cleaned_path) {
                Ok((analysis, acknowledgment)) => RunResult::Complete {
                    analysis: Box::new(analysis),
                    acknowledgment,
                },
                Err(e) => RunResult::Error(e),
            };
            let _ = tx.send(result);
        });
    }

    /// Load, clean, filter, aggregate and write the cleaned table.
    fn run_once(
        source: &Path,
        selection: &TypeFilter,
        settings: &AggregateSettings,
        cleaned_path: &Path,
    ) -> Result<(Analysis, String), String> {
        let mut analysis =
            pipeline::run(source, selection, settings).map_err(|e| e.to_string())?;
        DataWriter::write_csv(&mut analysis.table, cleaned_path).map_err(|e| e.to_string())?;
        Ok((analysis, DataWriter::acknowledgment(cleaned_path)))
    }

    /// Check for pipeline results
    fn check_run_results(&mut self) {
        let Some(rx) = self.run_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(RunResult::Complete {
                analysis,
                acknowledgment,
            }) => {
                self.control_panel
                    .update_type_options(analysis.type_options.clone());
                self.control_panel.set_status(&acknowledgment);
                self.control_panel.charts_ready = true;
                self.chart_viewer.set_analysis(*analysis, acknowledgment);
                self.is_running = false;
            }
            Ok(RunResult::Error(e)) => {
                error!(error = %e, "Dashboard run failed");
                self.control_panel.set_status(&format!("Error: {}", e));
                self.control_panel.charts_ready = false;
                self.chart_viewer.clear();
                self.is_running = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.run_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel.set_status("Error: pipeline thread stopped");
                self.is_running = false;
            }
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.source_path = path;
            // Types of the previous file may not exist in the new one.
            self.control_panel.settings.selection = TypeFilter::All;
            self.control_panel.type_options.clear();
            self.start_run();
        }
    }

    /// Write the current charts as PNG files
    fn handle_export_charts(&mut self) {
        let Some(analysis) = self.chart_viewer.analysis() else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let size = (self.config.chart_width, self.config.chart_height);
        match StaticChartRenderer::render_all(&analysis.aggregates, &self.config.chart_dir, size) {
            Ok(paths) => {
                self.control_panel.set_status(&format!(
                    "{} charts saved to {}",
                    paths.len(),
                    self.config.chart_dir.display()
                ));
            }
            Err(e) => {
                warn!(error = %e, "Chart export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_cleaned(&mut self) {
        let path: PathBuf = self.config.cleaned_path.clone();
        if let Err(e) = open::that(&path) {
            warn!(error = %e, path = %path.display(), "Could not open cleaned CSV");
            self.control_panel
                .set_status(&format!("Error: cannot open {}: {}", path.display(), e));
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_run_results();

        if self.is_running {
            ctx.request_repaint();
        }

        // Left panel - Filters
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, self.is_running) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FilterChanged => self.start_run(),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::OpenCleaned => self.handle_open_cleaned(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
