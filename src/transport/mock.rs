use std::{
    sync::{Arc, Mutex},
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use url::Url;

use crate::{
    protocol::error::InvocationError,
    transport::{Transport, TransportRequest, TransportResponse},
};

type Handler = dyn Fn(&TransportRequest) -> TransportResponse + Send + Sync;

/// Mock transport for internal testing
///
/// Answers every request with a handler, optionally after a delay, and
/// records what it was sent.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<Handler>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    base_url: Url,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            base_url: Url::parse("mock://agents").unwrap(),
        }
    }

    /// Create a mock transport that always returns the given JSON body with 200 OK
    pub fn json(body: &'static str) -> Self {
        Self::new(move |_| TransportResponse::new(200).body(body))
    }

    /// Delay every response
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// JSON bodies of the requests received so far
    pub fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.requests()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), InvocationError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, InvocationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}
