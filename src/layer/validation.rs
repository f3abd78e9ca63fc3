//! Validation layer for invocation requests

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::InvocationError,
    service::{InvocationRequest, InvocationResponse},
};

/// Layer that rejects invocations with an empty agent name or message
///
/// Nothing else is checked locally: a malformed agent name reaches the
/// remote side and fails there.
#[derive(Clone, Debug, Default)]
pub struct ValidationLayer;

impl ValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone, Debug)]
pub struct ValidationService<S> {
    inner: S,
}

impl<S> ValidationService<S> {
    /// Validate an invocation request
    fn validate_request(req: &InvocationRequest) -> Result<(), InvocationError> {
        let operation = &req.operation;

        if operation.agent_name.is_empty() {
            return Err(InvocationError::Validation(
                "Agent name cannot be empty".into(),
            ));
        }

        let has_text = operation
            .message
            .parts
            .iter()
            .any(|part| part.as_text().is_some_and(|text| !text.is_empty()));
        if !has_text {
            return Err(InvocationError::Validation("Message cannot be empty".into()));
        }

        if req.context.namespace.is_empty() {
            return Err(InvocationError::Validation(
                "Agent namespace cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

impl<S> Service<InvocationRequest> for ValidationService<S>
where
    S: Service<InvocationRequest, Response = InvocationResponse, Error = InvocationError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = InvocationResponse;
    type Error = InvocationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: InvocationRequest) -> Self::Future {
        if let Err(e) = Self::validate_request(&req) {
            return Box::pin(async move { Err(e) });
        }

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}
