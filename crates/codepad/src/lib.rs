//! A library for running code on a remote execution service.
//!
//! Codepad keeps an editing session (source text and selected language),
//! submits it to an HTTP execution service, and classifies what comes back.
//! The editor widget, busy overlay and file download are supplied by the
//! front end through small traits.
//!
//! # Features
//!
//! - **Language registry**: Total mapping from UI language keys to service tokens and file extensions.
//! - **Execution controller**: Busy/idle lifecycle, output-vs-error classification, stale-response guard.
//! - **Bounded requests**: Every submission has a timeout; a hung service cannot wedge the session.
//! - **TOML configuration**: Endpoint, timeout, editor settings and mapping overrides, with environment overrides.

pub use config::{
    Config, ConfigError, EXAMPLE_CONFIG, FileExtension, Language, LanguageMapping, UnknownLanguage,
};
pub use controller::{
    BUSY_MESSAGE, BusyIndicator, CANCELLED_REASON, DirectoryDownloader, Download, Downloader,
    EditorSettings, ExecutionController, PendingRun, RunDisposition, RunOutcome, dispatch,
};
pub use registry::LanguageRegistry;
pub use service::{ExecutionService, HttpExecutionService, ServiceError};
pub use types::{ExecutionRequest, ExecutionResponse, ExecutionResult, ExecutionStatus};

pub mod config;
pub mod controller;
pub mod registry;
pub mod service;
pub mod types;
