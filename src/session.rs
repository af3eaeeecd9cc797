//! Analysis Session
//! Holds the current result set and live charts, and runs one analysis at a time
//! on a background thread.

use crate::api::{AnalysisService, ApiError};
use crate::charts::ChartSet;
use crate::data::{parse_lines, InputError, ProjectionResponse, ResultSet, ResultSetError};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("An analysis is already running")]
    InFlight,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Response does not match input: {0}")]
    Misaligned(#[from] ResultSetError),
    #[error("Analysis worker exited without a result")]
    WorkerLost,
}

/// Status line shown under the analyze button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Processing,
    Complete,
    Failed,
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Ready => "Ready",
            Status::Processing => "Processing...",
            Status::Complete => "Processing complete.",
            Status::Failed => "An error occurred. Please try again.",
            Status::Info(msg) | Status::Error(msg) => msg.as_str(),
        }
    }
}

/// Reachability of the analysis service, probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHealth {
    Unknown,
    Checking,
    Online,
    Unreachable,
}

struct PendingAnalysis {
    texts: Vec<String>,
    rx: Receiver<Result<ProjectionResponse, ApiError>>,
}

/// In-memory state of the window: the last good result set, its charts and the request gate.
pub struct Session {
    result_set: Option<ResultSet>,
    charts: ChartSet,
    status: Status,
    pending: Option<PendingAnalysis>,
    health: ServiceHealth,
    health_rx: Option<Receiver<bool>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            result_set: None,
            charts: ChartSet::default(),
            status: Status::Ready,
            pending: None,
            health: ServiceHealth::Unknown,
            health_rx: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        self.result_set.as_ref()
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn health(&self) -> ServiceHealth {
        self.health
    }

    /// True while a request is in flight; the analyze action is disabled.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate `raw` and start one background request for its lines.
    ///
    /// Empty input and a request already in flight are rejected without calling the service.
    pub fn submit(
        &mut self,
        raw: &str,
        service: Arc<dyn AnalysisService>,
    ) -> Result<usize, SubmitError> {
        if self.pending.is_some() {
            return Err(SubmitError::InFlight);
        }
        let texts = parse_lines(raw)?;
        let count = texts.len();

        let (tx, rx) = channel();
        let worker_texts = texts.clone();
        thread::spawn(move || {
            let _ = tx.send(service.process_texts(&worker_texts));
        });

        tracing::info!(lines = count, "analysis submitted");
        self.status = Status::Processing;
        self.pending = Some(PendingAnalysis { texts, rx });
        Ok(count)
    }

    /// Collect a finished analysis, if any. Returns the outcome once, when it lands.
    pub fn poll(&mut self) -> Option<Result<usize, AnalysisError>> {
        let pending = self.pending.take()?;

        let outcome = match pending.rx.try_recv() {
            Ok(outcome) => outcome.map_err(AnalysisError::from),
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                return None;
            }
            Err(TryRecvError::Disconnected) => Err(AnalysisError::WorkerLost),
        };

        Some(self.finish(pending.texts, outcome))
    }

    /// Apply a response. Charts and result set change only on full success.
    fn finish(
        &mut self,
        texts: Vec<String>,
        outcome: Result<ProjectionResponse, AnalysisError>,
    ) -> Result<usize, AnalysisError> {
        let result = outcome
            .and_then(|response| ResultSet::new(texts, response).map_err(AnalysisError::from));

        match result {
            Ok(result_set) => {
                let count = result_set.line_count();
                self.charts = ChartSet::from_result_set(&result_set);
                self.result_set = Some(result_set);
                self.status = Status::Complete;
                tracing::info!(points = count, "analysis complete");
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Error processing texts: {}", e);
                self.status = Status::Failed;
                Err(e)
            }
        }
    }

    /// Query the service health endpoint in the background.
    pub fn check_health(&mut self, service: Arc<dyn AnalysisService>) {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let healthy = match service.check_health() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Analysis service health check failed: {}", e);
                    false
                }
            };
            let _ = tx.send(healthy);
        });
        self.health = ServiceHealth::Checking;
        self.health_rx = Some(rx);
    }

    /// True until the health check started by `check_health` reports back.
    pub fn is_checking_health(&self) -> bool {
        self.health_rx.is_some()
    }

    pub fn poll_health(&mut self) {
        let Some(rx) = self.health_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(true) => self.health = ServiceHealth::Online,
            Ok(false) | Err(TryRecvError::Disconnected) => self.health = ServiceHealth::Unreachable,
            Err(TryRecvError::Empty) => self.health_rx = Some(rx),
        }
    }
}
