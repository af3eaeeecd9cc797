//! Text Positioner - Embedding Projection Client & Interactive Scatter Viewer
//!
//! Sends lines of text to an embedding service and plots the returned
//! 1D, 2D and 3D projections.

mod api;
mod charts;
mod config;
mod data;
mod export;
mod gui;
mod session;

use api::{AnalysisService, HttpAnalysisClient};
use config::AppConfig;
use eframe::egui;
use gui::TextPositionerApp;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .init();

    tracing::info!("Analysis endpoint: {}", config.process_url());

    let service: Arc<dyn AnalysisService> = Arc::new(HttpAnalysisClient::new(&config)?);
    let service_url = config.api_url.clone();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Text Positioner"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Text Positioner",
        options,
        Box::new(move |cc| Ok(Box::new(TextPositionerApp::new(cc, service, service_url)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
