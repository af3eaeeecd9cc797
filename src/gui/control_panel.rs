//! Control Panel Widget
//! Left side panel with the text input, analyze action, status and data download.

use crate::data::count_lines;
use crate::session::{ServiceHealth, Session, Status};
use egui::{Color32, RichText, ScrollArea, TextEdit};

const INPUT_ROWS: usize = 18;

/// Left side control panel with text entry and processing controls.
pub struct ControlPanel {
    /// Raw text, one entry per line
    pub input: String,
    /// Service base URL, shown for reference
    pub service_url: String,
}

impl ControlPanel {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            service_url: service_url.into(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📍 Text Positioner")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Embedding Projection Viewer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Service Section =====
        ui.label(RichText::new("🌐 Analysis Service").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let (text, color) = match session.health() {
                        ServiceHealth::Unknown => ("Not checked", Color32::GRAY),
                        ServiceHealth::Checking => ("Checking...", Color32::GRAY),
                        ServiceHealth::Online => ("● Online", Color32::from_rgb(40, 167, 69)),
                        ServiceHealth::Unreachable => {
                            ("● Unreachable", Color32::from_rgb(220, 53, 69))
                        }
                    };
                    ui.label(RichText::new(&self.service_url).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(text).size(11.0).color(color));
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Input Section =====
        ui.label(RichText::new("📝 Texts (one per line)").size(14.0).strong());
        ui.add_space(5.0);

        ScrollArea::vertical()
            .id_salt("text_input")
            .max_height(360.0)
            .show(ui, |ui| {
                ui.add(
                    TextEdit::multiline(&mut self.input)
                        .hint_text("Enter texts, one per line")
                        .desired_rows(INPUT_ROWS)
                        .desired_width(f32::INFINITY),
                );
            });

        ui.add_space(5.0);
        ui.label(
            RichText::new(format!("{} lines", count_lines(&self.input)))
                .size(11.0)
                .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!session.is_busy(), |ui| {
                let button = egui::Button::new(RichText::new("▶ Analyze").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Analyze;
                }
            });

            ui.add_space(8.0);

            let data_button = egui::Button::new(RichText::new("💾 Download Data").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(data_button).clicked() {
                action = ControlPanelAction::DownloadData;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status = session.status();
        let status_color = match status {
            Status::Failed | Status::Error(_) => Color32::from_rgb(220, 53, 69),
            Status::Complete => Color32::from_rgb(40, 167, 69),
            _ => Color32::GRAY,
        };
        ui.horizontal(|ui| {
            if session.is_busy() {
                ui.spinner();
            }
            ui.label(RichText::new(status.text()).size(11.0).color(status_color));
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Analyze,
    DownloadData,
}
