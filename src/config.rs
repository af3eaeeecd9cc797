//! Application Configuration
//! Loaded from an optional `text_positioner` file, then `TEXT_POSITIONER_*` env vars.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base URL of the analysis service (scheme + host + port)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path of the text processing endpoint
    #[serde(default = "default_process_path")]
    pub process_path: String,

    /// Path of the service health endpoint
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Request timeout in seconds. Unset means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Route requests through HTTP(S)_PROXY from the environment
    #[serde(default = "default_true")]
    pub use_system_proxy: bool,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            process_path: default_process_path(),
            health_path: default_health_path(),
            request_timeout_secs: None,
            use_system_proxy: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("text_positioner").required(false))
            .add_source(config::Environment::with_prefix("TEXT_POSITIONER"));

        let config: AppConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Full URL of the text processing endpoint
    pub fn process_url(&self) -> String {
        join_url(&self.api_url, &self.process_path)
    }

    /// Full URL of the health endpoint
    pub fn health_url(&self) -> String {
        join_url(&self.api_url, &self.health_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_process_path() -> String {
    "/api/process-texts/".to_string()
}

fn default_health_path() -> String {
    "/api/health".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.process_path, "/api/process-texts/");
        assert_eq!(cfg.request_timeout(), None);
        assert!(cfg.use_system_proxy);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_endpoint_urls() {
        let cfg = AppConfig {
            api_url: "http://analysis.local:9000/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.process_url(),
            "http://analysis.local:9000/api/process-texts/"
        );
        assert_eq!(cfg.health_url(), "http://analysis.local:9000/api/health");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"request_timeout_secs": 15}"#).unwrap();
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.health_path, "/api/health");
    }
}
