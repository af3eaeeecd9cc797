//! Chart Viewer Widget
//! Right side scrollable panel with one card per projection chart.

use crate::charts::{ChartKind, ChartPlotter, ChartSet, OrbitView};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 380.0;
const ONE_D_HEIGHT: f32 = 220.0;

/// Scrollable display of the 1D, 2D and 3D charts.
#[derive(Default)]
pub struct ChartViewer {
    /// Camera for the 3D chart, shared with its image export
    pub orbit: OrbitView,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw all chart cards. Returns the id of a chart whose download button was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, charts: &ChartSet) -> Option<String> {
        let mut download = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if charts.is_empty() {
                    ui.label(
                        RichText::new("Enter some text on the left and press Analyze.")
                            .size(13.0)
                            .color(Color32::GRAY),
                    );
                    ui.add_space(CHART_SPACING);
                }

                for kind in ChartKind::ALL {
                    if self.draw_chart_card(ui, kind, charts) {
                        download = Some(kind.id().to_string());
                    }
                    ui.add_space(CHART_SPACING);
                }
            });

        download
    }

    /// Draw a single chart card. Returns true if its download button was clicked.
    fn draw_chart_card(&mut self, ui: &mut egui::Ui, kind: ChartKind, charts: &ChartSet) -> bool {
        let mut clicked = false;
        let accent = Color32::from_rgb(100, 149, 237);

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, accent))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(kind.title()).size(18.0).strong().color(accent));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🖼 Download Image").clicked() {
                            clicked = true;
                        }
                    });
                });

                ui.add_space(8.0);

                let height = if kind == ChartKind::OneD {
                    ONE_D_HEIGHT
                } else {
                    CHART_HEIGHT
                };

                match charts.get(kind) {
                    Some(chart) => {
                        if kind == ChartKind::ThreeD {
                            self.draw_orbit_controls(ui);
                        }
                        ChartPlotter::draw_chart(ui, chart, &mut self.orbit, height);
                    }
                    None => {
                        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                            ui.centered_and_justified(|ui| {
                                ui.label(RichText::new("No Data").size(20.0).color(Color32::GRAY));
                            });
                        });
                    }
                }
            });

        clicked
    }

    fn draw_orbit_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Yaw");
            ui.add(egui::Slider::new(&mut self.orbit.yaw, 0.0..=std::f64::consts::TAU).fixed_decimals(2));
            ui.add_space(10.0);
            ui.label("Pitch");
            ui.add(
                egui::Slider::new(
                    &mut self.orbit.pitch,
                    -OrbitView::MAX_PITCH..=OrbitView::MAX_PITCH,
                )
                .fixed_decimals(2),
            );
            if ui.small_button("Reset").clicked() {
                self.orbit = OrbitView::default();
            }
        });
        ui.label(
            RichText::new("Drag the chart to rotate")
                .size(11.0)
                .color(Color32::GRAY),
        );
    }
}
