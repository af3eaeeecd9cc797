//! Export Module
//! Raw result set download (JSON) and per-chart image download (PNG).

use crate::charts::{ChartKind, ChartRenderer, ChartSet, OrbitView, RenderError, EXPORT_PIXEL_RATIO};
use crate::data::ResultSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default file name for the raw data download
pub const DATA_FILE_NAME: &str = "positioning_data.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to download. Please analyze some text first.")]
    NoData,
    #[error("Chart not found.")]
    ChartNotFound(String),
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render chart: {0}")]
    Render(#[from] RenderError),
}

/// A rasterized chart ready to be saved.
pub struct ChartImage {
    pub kind: ChartKind,
    pub png: Vec<u8>,
}

impl ChartImage {
    pub fn file_name(&self) -> String {
        self.kind.image_file_name()
    }
}

/// Serialize the whole result set as indented JSON.
pub fn raw_data_json(result: Option<&ResultSet>) -> Result<String, ExportError> {
    let result = result.ok_or(ExportError::NoData)?;
    let json = serde_json::to_string_pretty(&result.to_export())?;
    Ok(json)
}

/// Rasterize the live chart registered under `id`.
pub fn chart_image(charts: &ChartSet, id: &str, view: &OrbitView) -> Result<ChartImage, ExportError> {
    let chart = charts
        .find(id)
        .ok_or_else(|| ExportError::ChartNotFound(id.to_string()))?;

    let png = ChartRenderer::render_png(chart, view)?;
    tracing::debug!(
        chart = id,
        bytes = png.len(),
        pixel_ratio = EXPORT_PIXEL_RATIO,
        "chart rasterized"
    );
    Ok(ChartImage {
        kind: chart.kind,
        png,
    })
}

/// Write exported bytes to the chosen destination.
pub fn save(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), ExportError> {
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::cat_dog;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn raw_export_without_analysis_is_an_error() {
        let err = raw_data_json(None).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
        assert_eq!(
            err.to_string(),
            "No data to download. Please analyze some text first."
        );
    }

    #[test]
    fn raw_export_contains_texts_and_projections() {
        let result = cat_dog();
        let json = raw_data_json(Some(&result)).unwrap();
        assert!(json.contains('\n'), "export should be indented");

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["texts"], json!(["cat", "dog"]));
        assert_eq!(value["1d"], json!([[0.1, 0.0, "cat"], [0.4, 0.0, "dog"]]));
        assert_eq!(value["2d"], json!([[0.1, 0.2, "cat"], [0.4, 0.5, "dog"]]));
        assert_eq!(
            value["3d"],
            json!([[0.1, 0.2, 0.3, "cat"], [0.4, 0.5, 0.6, "dog"]])
        );
    }

    #[test]
    fn image_export_without_chart_is_an_error() {
        let charts = ChartSet::default();
        let err = chart_image(&charts, "2d", &OrbitView::default()).err().unwrap();
        assert!(matches!(err, ExportError::ChartNotFound(ref id) if id == "2d"));
        assert_eq!(err.to_string(), "Chart not found.");
    }

    #[test]
    fn image_export_with_unknown_id_is_an_error() {
        let charts = ChartSet::from_result_set(&cat_dog());
        let err = chart_image(&charts, "4d", &OrbitView::default()).err().unwrap();
        assert!(matches!(err, ExportError::ChartNotFound(_)));
    }

    #[test]
    fn image_export_renders_live_chart() {
        if !crate::charts::system_font_available() {
            return;
        }
        let charts = ChartSet::from_result_set(&cat_dog());
        let image = chart_image(&charts, "3d", &OrbitView::default()).unwrap();

        assert_eq!(image.kind, ChartKind::ThreeD);
        assert_eq!(image.file_name(), "chart-3d.png");
        assert!(image.png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let json = raw_data_json(Some(&cat_dog())).unwrap();

        save(&path, &json).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), json);
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DATA_FILE_NAME);
        assert!(matches!(save(&path, b"{}"), Err(ExportError::Io(_))));
    }
}
