//! Remote execution service
//!
//! The controller talks to the service only through [`ExecutionService`], so
//! the transport can be swapped (HTTP in production, scripted fakes in tests).

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub use crate::service::http::HttpExecutionService;
use crate::types::{ExecutionRequest, ExecutionResponse};

mod http;

/// Failures that prevent a usable response from reaching the controller
///
/// A service-reported compile or runtime error is not a `ServiceError`; it
/// arrives as a normal [`ExecutionResponse`] with a non-empty `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("failed to reach execution service: {0}")]
    Transport(String),

    #[error("execution service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response from execution service: {0}")]
    Decode(String),

    #[error("execution service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// A remote service that executes source code
pub trait ExecutionService {
    /// Submit one request and wait for its single response
    fn execute(
        &self,
        request: &ExecutionRequest,
    ) -> impl Future<Output = Result<ExecutionResponse, ServiceError>> + Send;
}
