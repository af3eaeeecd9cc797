//! Analysis Service Client
//! Sends input lines to the embedding/projection service over HTTP.

use crate::config::AppConfig;
use crate::data::{ProcessTextsRequest, ProjectionResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Remote service that turns texts into embeddings and 1D/2D/3D projections.
///
/// Calls block; the GUI runs them on a background thread.
pub trait AnalysisService: Send + Sync {
    /// Issue a single request for `texts`. Any non-2xx status is an error.
    fn process_texts(&self, texts: &[String]) -> Result<ProjectionResponse, ApiError>;

    /// Ask the service whether it is up.
    fn check_health(&self) -> Result<(), ApiError>;
}

/// Blocking reqwest client bound to the configured endpoints.
pub struct HttpAnalysisClient {
    client: reqwest::blocking::Client,
    process_url: String,
    health_url: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.request_timeout());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            client,
            process_url: config.process_url(),
            health_url: config.health_url(),
        })
    }
}

impl AnalysisService for HttpAnalysisClient {
    fn process_texts(&self, texts: &[String]) -> Result<ProjectionResponse, ApiError> {
        tracing::debug!(url = %self.process_url, lines = texts.len(), "POST process-texts");

        let response = self
            .client
            .post(&self.process_url)
            .json(&ProcessTextsRequest { texts })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "analysis service rejected request");
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        let parsed = serde_json::from_slice::<ProjectionResponse>(&body)?;
        tracing::debug!(bytes = body.len(), "analysis response decoded");
        Ok(parsed)
    }

    fn check_health(&self) -> Result<(), ApiError> {
        let status = self.client.get(&self.health_url).send()?.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Accept one connection, answer with `status_line` and `body`, return the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }

            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn client_for(base: &str) -> HttpAnalysisClient {
        let config = AppConfig {
            api_url: base.to_string(),
            use_system_proxy: false,
            ..AppConfig::default()
        };
        HttpAnalysisClient::new(&config).unwrap()
    }

    #[test]
    fn posts_texts_and_decodes_projections() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"embeddings":[[1.0,2.0]],"1d":[[0.5]],"2d":[[0.5,0.25]],"3d":[[0.5,0.25,0.125]]}"#,
        );
        let client = client_for(&base);

        let response = client.process_texts(&["hello".to_string()]).unwrap();
        assert_eq!(response.three_d, vec![[0.5, 0.25, 0.125]]);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/process-texts/ HTTP/1.1"));
        assert!(request.contains(r#"{"texts":["hello"]}"#));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"detail":"Input texts cannot be empty."}"#,
        );
        let client = client_for(&base);

        let err = client.process_texts(&["x".to_string()]).unwrap_err();
        assert!(matches!(err, ApiError::Status(400)));
        server.join().unwrap();
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"embeddings":[]}"#);
        let client = client_for(&base);

        let err = client.process_texts(&["x".to_string()]).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        let base = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let client = client_for(&base);

        let err = client.process_texts(&["x".to_string()]).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn health_check_hits_health_path() {
        let (base, server) = serve_once("200 OK", r#"{"status":"healthy"}"#);
        let client = client_for(&base);

        client.check_health().unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /api/health HTTP/1.1"));
    }
}
