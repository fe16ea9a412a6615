//! reqwest-backed transport.
//!
//! # Example
//!
//! ```ignore
//! use exposure_api_client::transport::HttpTransport;
//!
//! let transport = HttpTransport::builder()
//!     .user_agent("exposure-app/1.0")
//!     .build()?;
//! ```

use std::time::Duration;

use super::{BoxFuture, HttpRequest, HttpResponse, Transport};
use crate::error::Result;

/// Builder for [`HttpTransport`].
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a total request timeout.
    ///
    /// Default: none, the connection-level defaults of reqwest apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTransport {
            client: builder.build()?,
        })
    }
}

/// Production transport over a shared `reqwest::Client`.
///
/// The client pools connections internally, so one instance serves all
/// concurrent dispatches.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method.into(), request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.body(request.body).send().await?;
            let status = response.status();
            // A body that fails mid-read means the call did not complete.
            let body = response.text().await?;

            Ok(HttpResponse {
                status: status.as_u16(),
                body,
                reason: status.canonical_reason().map(str::to_owned),
            })
        })
    }
}
