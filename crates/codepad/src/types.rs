use std::fmt;

use serde::{Deserialize, Serialize};

/// Request body sent to the remote execution service
///
/// Sent form-encoded as `code`, `language` and `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    /// Full source text
    pub code: String,

    /// Language token expected by the service (e.g., "py")
    pub language: String,

    /// Program stdin; interactive input is not supported, so this is always empty
    pub input: String,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            input: String::new(),
        }
    }
}

/// Response body returned by the remote execution service
///
/// Fields the service adds beyond `output` and `error` (time stamps,
/// language echo, ...) are ignored. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub output: String,

    #[serde(default)]
    pub error: String,
}

impl ExecutionResponse {
    /// Classify the response; a non-empty error wins over any output
    pub fn into_result(self) -> ExecutionResult {
        if self.error.is_empty() {
            ExecutionResult::Output(self.output)
        } else {
            ExecutionResult::Failure(self.error)
        }
    }
}

/// Outcome of a completed execution as reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Program output
    Output(String),

    /// Compilation or runtime error text, verbatim from the service
    Failure(String),
}

impl ExecutionResult {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionResult::Failure(_))
    }

    /// The text to show the user, whichever variant this is
    pub fn text(&self) -> &str {
        match self {
            ExecutionResult::Output(text) | ExecutionResult::Failure(text) => text,
        }
    }
}

/// Lifecycle state of the execution controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Nothing has been run yet
    #[default]
    Idle,

    /// A request is in flight
    Running,

    /// The latest request got a response from the service
    Completed,

    /// The latest request never got a usable response; carries the reason
    Unreachable(String),
}

impl ExecutionStatus {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, ExecutionStatus::Running)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Idle => f.write_str("idle"),
            ExecutionStatus::Running => f.write_str("running"),
            ExecutionStatus::Completed => f.write_str("completed"),
            ExecutionStatus::Unreachable(reason) => write!(f, "service unreachable: {reason}"),
        }
    }
}
