//! Control Panel Widget
//! Left side panel with the data source, the type filter and export actions.

use crate::data::TypeFilter;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User settings for one run
#[derive(Default, Clone)]
pub struct UserSettings {
    pub source_path: PathBuf,
    pub selection: TypeFilter,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    /// Distinct types from the last successful run.
    pub type_options: Vec<String>,
    pub status: String,
    pub charts_ready: bool,
}

impl ControlPanel {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            settings: UserSettings {
                source_path,
                selection: TypeFilter::All,
            },
            type_options: Vec::new(),
            status: "Ready".to_string(),
            charts_ready: false,
        }
    }

    /// Replace the selectable types after a run.
    pub fn update_type_options(&mut self, types: Vec<String>) {
        self.type_options = types;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, is_running: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📺 Chartify Titles")
                    .size(22.0)
                    .color(Color32::from_rgb(229, 9, 20)),
            );
            ui.label(RichText::new("EDA Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let file_name = self
                        .settings
                        .source_path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());
                    ui.label(RichText::new(file_name).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!is_running, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters =====
        ui.label(RichText::new("📌 Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.add_sized([90.0, 20.0], egui::Label::new("Select Type:"));
            ui.add_enabled_ui(!is_running, |ui| {
                ComboBox::from_id_salt("type_filter")
                    .width(160.0)
                    .selected_text(self.settings.selection.to_string())
                    .show_ui(ui, |ui| {
                        for option in TypeFilter::options(&self.type_options) {
                            let selected = self.settings.selection == option;
                            let label = option.to_string();
                            if ui.selectable_label(selected, label).clicked() && !selected {
                                self.settings.selection = option;
                                action = ControlPanelAction::FilterChanged;
                            }
                        }
                    });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Actions =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.charts_ready && !is_running, |ui| {
                let export = egui::Button::new(RichText::new("🖼 Export PNG charts").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(export).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }

                ui.add_space(8.0);

                let open = egui::Button::new(RichText::new("📄 Open cleaned CSV").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(open).clicked() {
                    action = ControlPanelAction::OpenCleaned;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);
        if is_running {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Running pipeline...").size(11.0));
            });
        }

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FilterChanged,
    ExportCharts,
    OpenCleaned,
}
