//! HTTP transport implementation for agent invocations

use std::{
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use url::Url;

use crate::protocol::error::InvocationError;

use super::{Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The agent host (e.g., "<http://kagent-controller.kagent:8083>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a new HTTP transport with a custom reqwest client
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }

    /// Resolve an endpoint path against the base URL
    ///
    /// Any path on the base URL is kept as a prefix.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn map_error(err: reqwest::Error, timeout: Option<Duration>) -> InvocationError {
        if err.is_timeout() {
            InvocationError::Timeout {
                after: timeout.unwrap_or_default(),
            }
        } else if err.is_connect() {
            InvocationError::transport(format!("Connection error: {}", err))
        } else {
            InvocationError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), InvocationError>> {
        // HTTP client is always ready
        Poll::Ready(Ok(()))
    }

    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, InvocationError> {
        let url = self.url_for(&request.endpoint);

        let mut req_builder = match request.method.as_str() {
            "POST" => self.client.post(&url),
            "GET" => self.client.get(&url),
            _ => {
                return Err(InvocationError::transport(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )))
            }
        };

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        tracing::debug!(%url, "sending request");

        let response = req_builder
            .send()
            .await
            .map_err(|e| Self::map_error(e, request.timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(e, request.timeout))?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
