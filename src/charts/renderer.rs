//! Static Chart Renderer
//! Rasterizes projection charts to PNG for image export.
//!
//! Layout matches the interactive charts:
//! 1. Title centered above the plot
//! 2. 1D: x axis only, labels below points
//! 3. 2D: x/y mesh, labels right of points
//! 4. 3D: the on-screen orbit projection with X/Y/Z guides, labels at points

use crate::charts::{ChartKind, OrbitView, ScatterChart};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::ops::Range;
use thiserror::Error;

/// Logical image size before the pixel ratio is applied
const BASE_WIDTH: u32 = 800;
const BASE_HEIGHT: u32 = 600;

/// Image exports are rendered at twice the logical size
pub const EXPORT_PIXEL_RATIO: u32 = 2;

const FONT: &str = "sans-serif";
const POINT_RGB: RGBColor = RGBColor(84, 112, 198);
const AXIS_RGB: [RGBColor; 3] = [
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(52, 152, 219),
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    BufferSize(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a chart to PNG bytes on a white background at `EXPORT_PIXEL_RATIO`.
    pub fn render_png(chart: &ScatterChart, view: &OrbitView) -> Result<Vec<u8>, RenderError> {
        Self::render_png_scaled(chart, view, EXPORT_PIXEL_RATIO)
    }

    fn render_png_scaled(
        chart: &ScatterChart,
        view: &OrbitView,
        pixel_ratio: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let (width, height) = Self::image_size(pixel_ratio);
        let mut buffer = vec![255u8; (width * height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let scale = pixel_ratio.max(1) as f64;
            match chart.kind {
                ChartKind::OneD | ChartKind::TwoD => Self::draw_planar(&root, chart, scale)?,
                ChartKind::ThreeD => Self::draw_3d(&root, chart, view, scale)?,
            }
            root.present().map_err(draw_err)?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::BufferSize(width, height))?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Pixel dimensions for a given ratio
    pub fn image_size(pixel_ratio: u32) -> (u32, u32) {
        let ratio = pixel_ratio.max(1);
        (BASE_WIDTH * ratio, BASE_HEIGHT * ratio)
    }

    fn draw_planar<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ScatterChart,
        scale: f64,
    ) -> Result<(), RenderError> {
        let is_1d = chart.kind == ChartKind::OneD;
        let x_range = chart.axis_range(0);
        let y_range = if is_1d { -1.0..1.0 } else { chart.axis_range(1) };

        let mut ctx = ChartBuilder::on(root)
            .caption(chart.kind.title(), (FONT, 20.0 * scale))
            .margin((20.0 * scale) as i32)
            .x_label_area_size((30.0 * scale) as i32)
            .y_label_area_size(if is_1d { 0 } else { (50.0 * scale) as i32 })
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        let mut mesh = ctx.configure_mesh();
        mesh.label_style((FONT, 12.0 * scale));
        if is_1d {
            mesh.disable_y_axis().disable_y_mesh();
        }
        mesh.draw().map_err(draw_err)?;

        let radius = (10.0 * scale) as i32;
        // 1D labels sit below the point, 2D labels to its right
        let label_offset = if is_1d {
            (-radius, radius + (4.0 * scale) as i32)
        } else {
            (radius + (4.0 * scale) as i32, -(6.0 * scale) as i32)
        };
        let label_style = (FONT, 13.0 * scale).into_font().color(&BLACK);

        ctx.draw_series(chart.points.iter().map(|p| {
            EmptyElement::at((p.position[0], p.position[1]))
                + Circle::new((0, 0), radius, POINT_RGB.mix(0.8).filled())
                + Text::new(p.label.clone(), label_offset, label_style.clone())
        }))
        .map_err(draw_err)?;

        Ok(())
    }

    /// Same orthographic projection as the interactive view, drawn on a 2D plane.
    fn draw_3d<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &ScatterChart,
        view: &OrbitView,
        scale: f64,
    ) -> Result<(), RenderError> {
        let layout = chart.orbit_layout(view);
        let margin = 20.0 * scale;
        let caption = 20.0 * scale;

        let (w, h) = root.dim_in_pixel();
        let plot_w = (w as f64 - 2.0 * margin).max(1.0);
        let plot_h = (h as f64 - 2.0 * margin - 2.0 * caption).max(1.0);
        let (x_range, y_range) = layout.bounds();
        let (x_range, y_range) = fit_aspect(x_range, y_range, plot_w / plot_h);

        let mut ctx = ChartBuilder::on(root)
            .caption(chart.kind.title(), (FONT, caption))
            .margin(margin as i32)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        let guide_label = (FONT, 14.0 * scale).into_font();
        for (guide, color) in layout.guides.iter().zip(AXIS_RGB) {
            ctx.draw_series(LineSeries::new(
                [guide.from, guide.to].map(|[x, y]| (x, y)),
                color.stroke_width((1.5 * scale) as u32),
            ))
            .map_err(draw_err)?;
            ctx.draw_series(std::iter::once(
                EmptyElement::at((guide.to[0], guide.to[1]))
                    + Text::new(
                        guide.name,
                        ((3.0 * scale) as i32, -(16.0 * scale) as i32),
                        guide_label.clone().color(&color),
                    ),
            ))
            .map_err(draw_err)?;
        }

        let radius = (5.0 * scale) as i32;
        let label_style = (FONT, 13.0 * scale).into_font().color(&BLACK);
        let label_offset = (radius + (3.0 * scale) as i32, -(6.0 * scale) as i32);

        ctx.draw_series(chart.points.iter().zip(&layout.points).map(|(p, &[x, y])| {
            EmptyElement::at((x, y))
                + Circle::new((0, 0), radius, POINT_RGB.filled())
                + Text::new(p.label.clone(), label_offset, label_style.clone())
        }))
        .map_err(draw_err)?;

        Ok(())
    }
}

/// Widen one range around its center so that width / height equals `aspect`.
fn fit_aspect(x: Range<f64>, y: Range<f64>, aspect: f64) -> (Range<f64>, Range<f64>) {
    let (w, h) = (x.end - x.start, y.end - y.start);
    if !(aspect > 0.0 && w > 0.0 && h > 0.0) {
        return (x, y);
    }
    if w / h < aspect {
        let half = h * aspect / 2.0;
        let mid = (x.start + x.end) / 2.0;
        ((mid - half)..(mid + half), y)
    } else {
        let half = w / aspect / 2.0;
        let mid = (y.start + y.end) / 2.0;
        (x, (mid - half)..(mid + half))
    }
}

/// Text rendering needs a system font; headless CI images may have none.
#[cfg(test)]
pub(crate) fn system_font_available() -> bool {
    let found = (FONT, 12.0).into_font().box_size("x").is_ok();
    if !found {
        eprintln!("no '{FONT}' font installed, skipping rendered image checks");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartSet;
    use crate::data::fixtures::cat_dog;

    fn decode(png: &[u8]) -> image::RgbImage {
        image::load_from_memory(png).unwrap().to_rgb8()
    }

    #[test]
    fn export_size_is_doubled() {
        assert_eq!(
            ChartRenderer::image_size(EXPORT_PIXEL_RATIO),
            (BASE_WIDTH * 2, BASE_HEIGHT * 2)
        );
        assert_eq!(ChartRenderer::image_size(0), (BASE_WIDTH, BASE_HEIGHT));
    }

    #[test]
    fn every_chart_renders_a_white_png_at_double_size() {
        if !system_font_available() {
            return;
        }
        let charts = ChartSet::from_result_set(&cat_dog());
        for kind in ChartKind::ALL {
            let chart = charts.get(kind).unwrap();
            let png = ChartRenderer::render_png(chart, &OrbitView::default()).unwrap();
            let img = decode(&png);

            assert_eq!(img.dimensions(), (1600, 1200), "{}", kind.id());
            assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255], "{}", kind.id());
            assert!(
                img.pixels().any(|p| p.0 != [255, 255, 255]),
                "{} chart drew nothing",
                kind.id()
            );
        }
    }

    #[test]
    fn unit_ratio_renders_logical_size() {
        if !system_font_available() {
            return;
        }
        let charts = ChartSet::from_result_set(&cat_dog());
        let chart = charts.get(ChartKind::TwoD).unwrap();
        let png = ChartRenderer::render_png_scaled(chart, &OrbitView::default(), 1).unwrap();
        assert_eq!(decode(&png).dimensions(), (BASE_WIDTH, BASE_HEIGHT));
    }

    #[test]
    fn fit_aspect_widens_the_narrow_side() {
        let (x, y) = fit_aspect(0.0..1.0, 0.0..1.0, 2.0);
        assert_eq!(x, -0.5..1.5);
        assert_eq!(y, 0.0..1.0);

        let (x, y) = fit_aspect(0.0..4.0, -1.0..1.0, 1.0);
        assert_eq!(x, 0.0..4.0);
        assert_eq!(y, -2.0..2.0);
    }
}
