//! High-level agent invocation client

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};

use tower::ServiceExt;
use tower_service::Service;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    client::config::ClientConfig,
    codec::JsonRpcId,
    protocol::{error::InvocationError, operation::SendMessage},
    service::{InvocationRequest, InvocationResponse, RequestContext},
};

/// Generate a fresh context identifier
pub fn new_context_id() -> String {
    Uuid::new_v4().to_string()
}

/// Client that sends messages to named agents and returns their text replies
///
/// Calls take `&self` and may run concurrently. Each call carries its own
/// context id and a call id unique to this client (and its clones), so
/// responses are matched to the call that produced them.
///
/// # Example
///
/// ```rust,no_run
/// use kagent_a2a::prelude::*;
///
/// # async fn example() -> Result<(), InvocationError> {
/// let client = AgentClientBuilder::new_http(ClientConfig::from_env()?).build()?;
///
/// let reply = client
///     .invoke("observability-agent", "Which pods restarted today?", None, None)
///     .await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
    metadata: HashMap<String, String>,
    next_call_id: Arc<AtomicI64>,
}

impl<S> AgentClient<S>
where
    S: Service<InvocationRequest, Response = InvocationResponse, Error = InvocationError> + Clone,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            metadata: HashMap::new(),
            next_call_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Send an extra header on every call
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn next_call_id(&self) -> JsonRpcId {
        JsonRpcId::Number(self.next_call_id.fetch_add(1, Ordering::Relaxed))
    }

    fn build_context(&self, timeout: Option<Duration>) -> RequestContext {
        RequestContext {
            namespace: self.config.namespace.clone(),
            auth: None, // Set by AuthLayer
            timeout: Some(timeout.unwrap_or(self.config.default_timeout)),
            metadata: self.metadata.clone(),
        }
    }

    /// Send a message to an agent and return its reply text
    ///
    /// # Arguments
    ///
    /// * `agent_name` - Name of the agent within the configured namespace
    /// * `message` - Text sent verbatim as the only content part
    /// * `context_id` - Session to continue; a new one is generated when `None`
    /// * `timeout` - Deadline for the call; the configured default when `None`
    ///
    /// # Errors
    ///
    /// `Transport` on network failures and non-2xx statuses, `Timeout` when
    /// the deadline expires and `Decode` when the body cannot be parsed. A reply
    /// of unknown shape is returned as the raw envelope text.
    pub async fn invoke(
        &self,
        agent_name: &str,
        message: &str,
        context_id: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<String, InvocationError> {
        self.invoke_detailed(agent_name, message, context_id, timeout)
            .await
            .map(InvocationResponse::into_text)
    }

    /// Send a message to an agent and return the full invocation response
    #[instrument(
        skip_all,
        fields(agent = %agent_name, context_id = tracing::field::Empty, call_id = tracing::field::Empty)
    )]
    pub async fn invoke_detailed(
        &self,
        agent_name: &str,
        message: &str,
        context_id: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<InvocationResponse, InvocationError> {
        let context_id = context_id.unwrap_or_else(new_context_id);
        let call_id = self.next_call_id();

        let span = tracing::Span::current();
        span.record("context_id", context_id.as_str());
        span.record("call_id", tracing::field::display(&call_id));

        let operation = SendMessage::new(agent_name, message, context_id, call_id);
        let request = InvocationRequest::new(operation, self.build_context(timeout));

        tracing::debug!("invoking agent");
        self.service.clone().oneshot(request).await
    }

    /// Send a message in a fresh context with the default timeout
    pub async fn ask(&self, agent_name: &str, message: &str) -> Result<String, InvocationError> {
        self.invoke(agent_name, message, None, None).await
    }

    /// Start a session that reuses one context id across calls
    pub fn session(&self, agent_name: impl Into<String>) -> Session<'_, S> {
        self.session_with_context(agent_name, new_context_id())
    }

    /// Resume a session with a known context id
    pub fn session_with_context(
        &self,
        agent_name: impl Into<String>,
        context_id: impl Into<String>,
    ) -> Session<'_, S> {
        Session {
            client: self,
            agent_name: agent_name.into(),
            context_id: context_id.into(),
        }
    }
}

/// A series of calls to one agent sharing a context id
pub struct Session<'a, S> {
    client: &'a AgentClient<S>,
    agent_name: String,
    context_id: String,
}

impl<S> Session<'_, S>
where
    S: Service<InvocationRequest, Response = InvocationResponse, Error = InvocationError> + Clone,
{
    /// The context id every call in this session carries
    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    /// Send a message within the session
    pub async fn send(&self, message: &str) -> Result<String, InvocationError> {
        self.client
            .invoke(&self.agent_name, message, Some(self.context_id.clone()), None)
            .await
    }
}
