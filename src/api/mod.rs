//! API module - Client for the text analysis service

mod client;

pub use client::{AnalysisService, ApiError, HttpAnalysisClient};
