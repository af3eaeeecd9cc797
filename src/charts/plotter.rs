//! Chart Plotter Module
//! Draws the interactive projection charts using egui_plot.

use crate::charts::{ChartKind, OrbitView, ScatterChart};
use egui::{Align2, Color32, RichText};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Text};

/// Point color (blue)
pub const POINT_COLOR: Color32 = Color32::from_rgb(84, 112, 198);
/// Axis guide colors for the 3D view (X red, Y green, Z blue)
pub const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
];

const POINT_RADIUS_2D: f32 = 10.0;
const POINT_RADIUS_3D: f32 = 5.0;
const LABEL_SIZE: f32 = 12.0;
const DRAG_SENSITIVITY: f64 = 0.01;

/// Creates interactive scatter charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart of any kind. `view` is only used (and updated by dragging) for 3D.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ScatterChart, view: &mut OrbitView, height: f32) {
        match chart.kind {
            ChartKind::OneD | ChartKind::TwoD => Self::draw_planar_chart(ui, chart, height),
            ChartKind::ThreeD => Self::draw_orbit_chart(ui, chart, view, height),
        }
    }

    /// Hover label: the source text of the nearest point, nothing elsewhere.
    fn hover_label(name: &str, _value: &PlotPoint) -> String {
        name.to_owned()
    }

    /// 1D and 2D scatter. 1D pins y to zero and hides the y axis.
    fn draw_planar_chart(ui: &mut egui::Ui, chart: &ScatterChart, height: f32) {
        let is_1d = chart.kind == ChartKind::OneD;
        let x_range = chart.axis_range(0);
        let y_range = if is_1d { -1.0..1.0 } else { chart.axis_range(1) };
        let label_gap = (y_range.end - y_range.start) * 0.04;

        let mut plot = Plot::new(format!("chart_{}", chart.kind.id()))
            .height(height)
            .allow_scroll(false)
            .include_x(x_range.start)
            .include_x(x_range.end)
            .include_y(y_range.start)
            .include_y(y_range.end)
            .label_formatter(Self::hover_label);

        if is_1d {
            plot = plot.show_axes([true, false]).show_grid([true, false]);
        } else {
            plot = plot.x_axis_label("x").y_axis_label("y");
        }

        plot.show(ui, |plot_ui| {
            for point in &chart.points {
                let [x, y, _] = point.position;

                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[x, y]]))
                        .radius(POINT_RADIUS_2D)
                        .color(POINT_COLOR.gamma_multiply(0.8))
                        .name(&point.label),
                );

                // 1D labels sit below the point, 2D labels to its right
                let (anchor, at) = if is_1d {
                    (Align2::CENTER_TOP, PlotPoint::new(x, y - label_gap))
                } else {
                    (Align2::LEFT_CENTER, PlotPoint::new(x, y))
                };
                let text = if is_1d {
                    point.label.clone()
                } else {
                    format!("    {}", point.label)
                };
                plot_ui.text(
                    Text::new(at, RichText::new(text).size(LABEL_SIZE)).anchor(anchor),
                );
            }
        });
    }

    /// Orthographic 3D scatter. Drag to orbit.
    fn draw_orbit_chart(ui: &mut egui::Ui, chart: &ScatterChart, view: &mut OrbitView, height: f32) {
        let layout = chart.orbit_layout(view);

        let response = Plot::new(format!("chart_{}", chart.kind.id()))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_scroll(false)
            .label_formatter(Self::hover_label)
            .show(ui, |plot_ui| {
                for (guide, color) in layout.guides.iter().zip(AXIS_COLORS) {
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![guide.from, guide.to]))
                            .color(color)
                            .width(1.5),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(guide.to[0], guide.to[1]),
                            RichText::new(guide.name).strong().color(color),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }

                for (point, &[sx, sy]) in chart.points.iter().zip(&layout.points) {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[sx, sy]]))
                            .radius(POINT_RADIUS_3D)
                            .color(POINT_COLOR)
                            .name(&point.label),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(sx, sy),
                            RichText::new(format!("  {}", point.label)).size(LABEL_SIZE),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            })
            .response;

        if response.dragged() {
            let delta = response.drag_delta();
            view.rotate(
                -delta.x as f64 * DRAG_SENSITIVITY,
                delta.y as f64 * DRAG_SENSITIVITY,
            );
        }
    }
}
