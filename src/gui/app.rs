//! Text Positioner Main Application
//! Main window with control panel and chart viewer.

use crate::api::AnalysisService;
use crate::export::{self, ExportError, DATA_FILE_NAME};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::session::{Session, Status};
use egui::SidePanel;
use std::sync::Arc;

/// Main application window.
pub struct TextPositionerApp {
    service: Arc<dyn AnalysisService>,
    session: Session,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    /// Message shown in a blocking alert window
    alert: Option<String>,
}

impl TextPositionerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        service: Arc<dyn AnalysisService>,
        service_url: String,
    ) -> Self {
        let mut session = Session::new();
        session.check_health(service.clone());

        Self {
            service,
            session,
            control_panel: ControlPanel::new(service_url),
            chart_viewer: ChartViewer::new(),
            alert: None,
        }
    }

    /// Validate input and start the background analysis
    fn handle_analyze(&mut self) {
        if let Err(e) = self
            .session
            .submit(&self.control_panel.input, self.service.clone())
        {
            tracing::debug!("analysis not started: {}", e);
            self.alert = Some(e.to_string());
        }
    }

    /// Check for a finished analysis
    fn check_analysis_results(&mut self) {
        if let Some(Err(e)) = self.session.poll() {
            tracing::debug!("analysis failed: {:?}", e);
        }
    }

    /// Save the raw result set as JSON
    fn handle_download_data(&mut self) {
        let json = match export::raw_data_json(self.session.result_set()) {
            Ok(json) => json,
            Err(e) => {
                self.alert = Some(e.to_string());
                return;
            }
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(DATA_FILE_NAME)
            .save_file()
        else {
            return; // User cancelled
        };

        self.report_save(export::save(&path, json), DATA_FILE_NAME);
    }

    /// Save one chart as a PNG image
    fn handle_download_image(&mut self, chart_id: &str) {
        let image = match export::chart_image(
            self.session.charts(),
            chart_id,
            &self.chart_viewer.orbit,
        ) {
            Ok(image) => image,
            Err(e @ ExportError::ChartNotFound(_)) => {
                tracing::warn!(chart = chart_id, "image requested for missing chart");
                self.alert = Some(e.to_string());
                return;
            }
            Err(e) => {
                tracing::error!("Chart render failed: {}", e);
                self.session.set_status(Status::Error(format!("Error: {}", e)));
                return;
            }
        };

        let file_name = image.file_name();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };

        self.report_save(export::save(&path, &image.png), &file_name);
    }

    fn report_save(&mut self, result: Result<(), ExportError>, file_name: &str) {
        match result {
            Ok(()) => self
                .session
                .set_status(Status::Info(format!("Saved {}", file_name))),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.session.set_status(Status::Error(format!("Error: {}", e)));
            }
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.alert = None;
        }
    }
}

impl eframe::App for TextPositionerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_analysis_results();
        self.session.poll_health();

        // Keep polling while a request or the health check is outstanding
        if self.session.is_busy() || self.session.is_checking_health() {
            ctx.request_repaint();
        }

        self.show_alert(ctx);
        let blocked = self.alert.is_some();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let action = self.control_panel.show(ui, &self.session);

                        match action {
                            ControlPanelAction::Analyze => self.handle_analyze(),
                            ControlPanelAction::DownloadData => self.handle_download_data(),
                            ControlPanelAction::None => {}
                        }
                    });
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                if let Some(chart_id) = self.chart_viewer.show(ui, self.session.charts()) {
                    self.handle_download_image(&chart_id);
                }
            });
        });
    }
}
