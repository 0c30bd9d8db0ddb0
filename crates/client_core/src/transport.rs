//! HTTP delivery of commands to the control server's request handler.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::RequestError,
    protocol::{Command, REQUEST_ENDPOINT, REQUEST_PARAM},
};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("HTTP {code} {reason}")]
    Status { code: u16, reason: String },
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Status word and description, in the shape the operator sees them.
    pub fn into_request_error(self) -> RequestError {
        match self {
            TransportError::Status { code, reason } => {
                RequestError::transport(code.to_string(), reason)
            }
            TransportError::Timeout(description) => RequestError::transport("timeout", description),
            TransportError::Network(description) => RequestError::transport("error", description),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            TransportError::Timeout(value.to_string())
        } else {
            TransportError::Network(value.to_string())
        }
    }
}

/// Sends one command and returns the raw response body.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn send(&self, command: &Command) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// `base_url` is resolved the way a browser resolves a relative link from
    /// the control page, so both `http://host/tcs/` and
    /// `http://host/tcs/alerts.html` target `http://host/tcs/request.cgi`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base url '{base_url}'"))?;
        let endpoint = base
            .join(REQUEST_ENDPOINT)
            .with_context(|| format!("cannot resolve {REQUEST_ENDPOINT} against '{base_url}'"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CommandTransport for HttpTransport {
    async fn send(&self, command: &Command) -> Result<String, TransportError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[(REQUEST_PARAM, command.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
