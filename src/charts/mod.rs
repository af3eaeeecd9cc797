//! Charts module - Projection chart model and rendering

mod plotter;
mod renderer;
mod scatter;

pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderError, EXPORT_PIXEL_RATIO};
pub use scatter::{ChartKind, ChartSet, OrbitView, ScatterChart};

#[cfg(test)]
pub(crate) use renderer::system_font_available;
