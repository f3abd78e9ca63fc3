//! Client builder for constructing agent clients with composable layers

use std::{collections::HashMap, sync::Arc, time::Duration};

use tower::{util::BoxCloneSyncService, ServiceBuilder};

use crate::{
    client::{AgentClient, ClientConfig},
    codec::{Codec, JsonRpcCodec},
    layer::{AuthCredentials, AuthLayer, ValidationLayer},
    protocol::error::InvocationError,
    service::{InvocationRequest, InvocationResponse, InvocationService},
    transport::{HttpTransport, Transport},
};

/// The boxed service stack a built client drives
pub type InvocationStack =
    BoxCloneSyncService<InvocationRequest, InvocationResponse, InvocationError>;

/// Builder for constructing agent clients
///
/// The resulting stack is validation, then authentication (when configured),
/// then the core invocation service over the chosen transport.
///
/// # Example
///
/// ```rust,no_run
/// use kagent_a2a::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), InvocationError> {
/// let config = ClientConfig::from_env()?;
/// let client = AgentClientBuilder::new_http(config)
///     .with_bearer_auth("token123")
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let reply = client.ask("observability-agent", "ping").await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
pub struct AgentClientBuilder<T: Transport> {
    config: ClientConfig,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    auth: Option<AuthCredentials>,
    metadata: HashMap<String, String>,
}

impl<T: Transport> AgentClientBuilder<T> {
    /// Create a builder without a transport
    ///
    /// A transport must be supplied with [`with_transport`](Self::with_transport).
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            codec: None,
            auth: None,
            metadata: HashMap::new(),
        }
    }

    /// Use a custom transport
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Enable bearer token authentication
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::bearer(token));
        self
    }

    /// Enable API key authentication
    ///
    /// # Arguments
    ///
    /// * `key` - The API key
    /// * `header` - The header name for the API key (e.g., "X-API-Key")
    pub fn with_api_key_auth(mut self, key: impl Into<String>, header: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::api_key(key, header));
        self
    }

    /// Enable basic HTTP authentication
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthCredentials::basic(username, password));
        self
    }

    /// Set custom authentication credentials
    pub fn with_auth(mut self, credentials: AuthCredentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Set the default timeout for calls that do not pass one
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    /// Send an extra header on every call
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the agent client
    ///
    /// # Errors
    ///
    /// Returns `InvocationError::Config` if no transport has been configured
    pub fn build(self) -> Result<AgentClient<InvocationStack>, InvocationError> {
        let transport = self.transport.ok_or_else(|| {
            InvocationError::Config(
                "Transport not configured. Use new_http() or with_transport()".into(),
            )
        })?;

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonRpcCodec));
        let core = InvocationService::new(transport, codec);

        let service = match self.auth {
            Some(credentials) => BoxCloneSyncService::new(
                ServiceBuilder::new()
                    .layer(ValidationLayer::new())
                    .layer(AuthLayer::new(credentials))
                    .service(core),
            ),
            None => BoxCloneSyncService::new(
                ServiceBuilder::new()
                    .layer(ValidationLayer::new())
                    .service(core),
            ),
        };

        let mut client = AgentClient::new(service, self.config);
        for (key, value) in self.metadata {
            client = client.with_metadata(key, value);
        }

        Ok(client)
    }
}

impl AgentClientBuilder<HttpTransport> {
    /// Create a new client builder with the HTTP transport
    pub fn new_http(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.base_url.clone());
        Self::new(config).with_transport(transport)
    }
}
