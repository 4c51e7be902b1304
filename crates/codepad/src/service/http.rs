//! HTTP transport for the execution service

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::ServiceConfig;
use crate::service::{ExecutionService, ServiceError};
use crate::types::{ExecutionRequest, ExecutionResponse};

/// Execution service reached over HTTP
///
/// Requests are POSTed form-encoded to a single endpoint; responses are JSON.
#[derive(Debug, Clone)]
pub struct HttpExecutionService {
    http: Client,
    url: String,
    timeout: Duration,
}

impl HttpExecutionService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout)
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl ExecutionService for HttpExecutionService {
    #[instrument(skip(self, request), fields(url = %self.url, language = %request.language))]
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, ServiceError> {
        let resp = self
            .http
            .post(&self.url)
            .form(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response = resp.json::<ExecutionResponse>().await.map_err(|e| {
            if e.is_decode() {
                ServiceError::Decode(e.to_string())
            } else {
                self.transport_error(e)
            }
        })?;
        debug!(failed = !response.error.is_empty(), "received execution response");

        Ok(response)
    }
}
