//! Execution controller
//!
//! Owns the editing session (source text, selected language, last result) and
//! drives submissions to the execution service.
//!
//! A run has three steps: [`ExecutionController::begin_run`] marks the session
//! busy and snapshots the request, [`dispatch`] performs the exchange with a
//! bounded wait, and [`ExecutionController::finish_run`] classifies the
//! outcome. [`ExecutionController::run`] chains all three. Callers that keep
//! accepting edits while a request is in flight can drive the steps
//! themselves; every run carries a generation number and only the most
//! recently started run may update the session.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

pub use crate::controller::download::{DirectoryDownloader, Download, Downloader};
use crate::config::{Config, Language};
use crate::registry::LanguageRegistry;
use crate::service::{ExecutionService, ServiceError};
use crate::types::{ExecutionRequest, ExecutionResponse, ExecutionResult, ExecutionStatus};

mod download;

/// Message shown on the busy indicator while a request is in flight
pub const BUSY_MESSAGE: &str = "Compiling...";

/// Result of one exchange with the execution service
pub type RunOutcome = Result<ExecutionResponse, ServiceError>;

/// Modal overlay shown while a request is in flight
///
/// Every `show` is followed by exactly one `dismiss`.
pub trait BusyIndicator {
    fn show(&self, message: &str);
    fn dismiss(&self);
}

/// Status reason recorded when a run is dropped before its outcome arrives
pub const CANCELLED_REASON: &str = "request cancelled";

/// A run that has been started but not finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRun {
    generation: u64,
    request: ExecutionRequest,
}

impl PendingRun {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &ExecutionRequest {
        &self.request
    }
}

/// What [`ExecutionController::finish_run`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    /// The outcome belonged to the latest run and updated the session
    Applied,

    /// A newer run had started; the outcome was discarded
    Stale,
}

/// Presentation settings for the editor widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Syntax mode identifier for the selected language
    pub mode: &'static str,
    pub theme: String,
    pub font_size: u16,
}

/// Dismisses the busy indicator of a run whose future was dropped mid-flight
struct RunGuard<'a, S, B: BusyIndicator, D> {
    controller: &'a mut ExecutionController<S, B, D>,
    armed: bool,
}

impl<S, B: BusyIndicator, D> Drop for RunGuard<'_, S, B, D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(
            generation = self.controller.generation,
            "execution run cancelled before completion"
        );
        self.controller.indicator.dismiss();
        self.controller.status = ExecutionStatus::Unreachable(CANCELLED_REASON.to_owned());
    }
}

/// Perform one exchange with the service, giving up after `timeout`
pub async fn dispatch<S: ExecutionService>(
    service: &S,
    request: &ExecutionRequest,
    timeout: Duration,
) -> RunOutcome {
    match tokio::time::timeout(timeout, service.execute(request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ServiceError::Timeout(timeout)),
    }
}

/// Session state and submission lifecycle
#[derive(Debug)]
pub struct ExecutionController<S, B, D> {
    service: S,
    indicator: B,
    downloader: D,
    registry: LanguageRegistry,
    timeout: Duration,
    theme: String,
    font_size: u16,
    save_base_name: String,

    source_text: String,
    language: Language,
    status: ExecutionStatus,
    current_result: Option<ExecutionResult>,
    generation: u64,
}

impl<S, B, D> ExecutionController<S, B, D>
where
    S: ExecutionService,
    B: BusyIndicator,
    D: Downloader,
{
    /// Create a controller with an empty buffer and the configured default language
    pub fn new(config: &Config, service: S, indicator: B, downloader: D) -> Self {
        Self {
            service,
            indicator,
            downloader,
            registry: config.registry(),
            timeout: config.service.timeout(),
            theme: config.editor.theme.clone(),
            font_size: config.editor.font_size,
            save_base_name: config.save.base_name.clone(),
            source_text: String::new(),
            language: config.editor.default_language,
            status: ExecutionStatus::Idle,
            current_result: None,
            generation: 0,
        }
    }

    /// Replace the source text
    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
    }

    /// Select a language; the source text and last result are kept
    pub fn set_language(&mut self, language: Language) {
        debug!(from = %self.language, to = %language, "language changed");
        self.language = language;
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn status(&self) -> &ExecutionStatus {
        &self.status
    }

    /// Result of the latest applied run, if any
    pub fn current_result(&self) -> Option<&ExecutionResult> {
        self.current_result.as_ref()
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn indicator(&self) -> &B {
        &self.indicator
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Upper bound on a single request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            mode: self.language.editor_mode(),
            theme: self.theme.clone(),
            font_size: self.font_size,
        }
    }

    /// Mark the session busy and snapshot the request for the current buffer
    ///
    /// The status is `Running` and the busy indicator is up before this
    /// returns, so both are visible before any network traffic.
    pub fn begin_run(&mut self) -> PendingRun {
        self.generation += 1;
        let token = self.registry.token_of(self.language);
        let request = ExecutionRequest::new(self.source_text.clone(), token);

        // Before the indicator, which draws without ending its line
        info!(
            generation = self.generation,
            language = %self.language,
            token,
            bytes = self.source_text.len(),
            "submitting source"
        );

        self.status = ExecutionStatus::Running;
        self.indicator.show(BUSY_MESSAGE);

        PendingRun {
            generation: self.generation,
            request,
        }
    }

    /// Apply the outcome of a run and dismiss its busy indicator
    ///
    /// Outcomes of runs that have since been superseded are discarded. A
    /// transport failure leaves the previous result in place and moves the
    /// status to `Unreachable`.
    pub fn finish_run(&mut self, pending: PendingRun, outcome: RunOutcome) -> RunDisposition {
        self.indicator.dismiss();

        if let Err(ref err) = outcome {
            warn!(generation = pending.generation, error = %err, "execution request failed");
        }

        if pending.generation != self.generation {
            debug!(
                generation = pending.generation,
                latest = self.generation,
                "discarding stale execution outcome"
            );
            return RunDisposition::Stale;
        }

        match outcome {
            Ok(response) => {
                let result = response.into_result();
                debug!(failure = result.is_failure(), "execution completed");
                self.current_result = Some(result);
                self.status = ExecutionStatus::Completed;
            }
            Err(err) => {
                self.status = ExecutionStatus::Unreachable(err.to_string());
            }
        }

        RunDisposition::Applied
    }

    /// Submit the current buffer and wait for the outcome
    ///
    /// Dropping the returned future before it completes still dismisses the
    /// busy indicator and leaves the status `Unreachable` with
    /// [`CANCELLED_REASON`].
    #[instrument(skip(self), fields(language = %self.language))]
    pub async fn run(&mut self) -> RunDisposition {
        let pending = self.begin_run();
        let mut guard = RunGuard {
            controller: self,
            armed: true,
        };

        let timeout = guard.controller.timeout;
        let outcome = dispatch(&guard.controller.service, pending.request(), timeout).await;

        guard.armed = false;
        guard.controller.finish_run(pending, outcome)
    }

    /// The file [`save`](Self::save) would hand to the downloader
    pub fn artifact(&self) -> Download {
        let mapping = self.registry.lookup(self.language);
        Download {
            file_name: format!("{}.{}", self.save_base_name, mapping.extension),
            mime_type: mapping.mime_type(),
            contents: self.source_text.clone(),
        }
    }

    /// Hand the current buffer to the downloader
    pub fn save(&self) {
        let download = self.artifact();
        info!(file_name = %download.file_name, "saving source");
        self.downloader.download(download);
    }
}
