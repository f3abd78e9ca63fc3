//! Invocation service request types

use std::{collections::HashMap, time::Duration};

use crate::{layer::auth::AuthCredentials, protocol::operation::SendMessage};

/// Default agent namespace of a kagent installation
pub const DEFAULT_NAMESPACE: &str = "kagent";

/// A request to the invocation service
///
/// This wraps a send operation with the context needed to route and bound it
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// The operation to execute
    pub operation: SendMessage,

    /// Request context (namespace, auth, deadline, metadata)
    pub context: RequestContext,
}

impl InvocationRequest {
    /// Create a new invocation request
    pub fn new(operation: SendMessage, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Request context containing routing and configuration
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Agent namespace interpolated into the endpoint
    pub namespace: String,

    /// Authentication credentials (if any)
    pub auth: Option<AuthCredentials>,

    /// Hard deadline for the whole call
    pub timeout: Option<Duration>,

    /// Additional metadata headers
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            auth: None,
            timeout: None,
            metadata: HashMap::new(),
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
