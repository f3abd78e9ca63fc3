//! Core invocation service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::error::InvocationError,
    service::{InvocationRequest, InvocationResponse},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Core invocation service that wraps a transport
///
/// Performs exactly one request/response exchange per call. There is no
/// retry: re-sending a message may make the agent act twice.
pub struct InvocationService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> InvocationService<T>
where
    T: Transport,
{
    /// Create a new invocation service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from an invocation request
    fn build_transport_request(
        req: &InvocationRequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, InvocationError> {
        let operation = &req.operation;
        let endpoint = operation.endpoint(&req.context.namespace);

        let mut transport_req = TransportRequest::new(endpoint, operation.method())
            .header("Content-Type", codec.content_type())
            .header("Accept", codec.content_type());

        if let Some(auth) = &req.context.auth {
            let (header, value) = auth.to_header();
            transport_req = transport_req.header(header, value);
        }

        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        if let Some(timeout) = req.context.timeout {
            transport_req = transport_req.timeout(timeout);
        }

        let body = codec.encode_request(operation)?;
        Ok(transport_req.body(body))
    }

    /// Turn a transport response into an invocation response
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
        req: InvocationRequest,
    ) -> Result<InvocationResponse, InvocationError> {
        if !transport_resp.is_success() {
            tracing::debug!(status = transport_resp.status, "agent returned error status");
            return Err(InvocationError::http_status(
                transport_resp.status,
                transport_resp.body_text(),
            ));
        }

        let operation = req.operation;
        let decoded = codec.decode_response(&transport_resp.body, &operation.call_id)?;

        if let Some(error) = &decoded.envelope.error {
            tracing::warn!(
                code = error.code,
                message = %error.message,
                "agent answered with a JSON-RPC error"
            );
        }

        let response =
            InvocationResponse::from_envelope(decoded, operation.context_id, operation.call_id);

        tracing::debug!(
            reply_kind = ?response.reply_kind,
            state = ?response.state,
            "agent reply decoded"
        );

        Ok(response)
    }
}

impl<T> Service<InvocationRequest> for InvocationService<T>
where
    T: Transport,
{
    type Response = InvocationResponse;
    type Error = InvocationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: InvocationRequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            // Deadline covers the whole exchange, including reading the body
            let transport_resp = match req.context.timeout {
                Some(after) => tokio::time::timeout(after, transport.execute(transport_req))
                    .await
                    .map_err(|_| InvocationError::Timeout { after })??,
                None => transport.execute(transport_req).await?,
            };

            Self::parse_transport_response(transport_resp, codec.as_ref(), req)
        })
    }
}

impl<T> Clone for InvocationService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}
