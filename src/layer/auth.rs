//! Gateway credentials for agent invocations
//!
//! The kagent controller itself does not authenticate A2A calls, but clusters
//! often expose it through an ingress or API gateway that does. Credentials
//! are attached as one HTTP header on every `message/send` request.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use base64::{engine::general_purpose, Engine as _};
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::InvocationError,
    service::{InvocationRequest, InvocationResponse},
};

/// Environment variable holding a gateway bearer token
pub const TOKEN_ENV: &str = "KAGENT_API_TOKEN";

/// Credentials presented to the gateway in front of the agent host
///
/// `Debug` output never contains the secret.
#[derive(Clone)]
pub enum AuthCredentials {
    /// `Authorization: Bearer <token>`
    Bearer(String),

    /// Secret sent verbatim in a custom header
    ApiKey { key: String, header: String },

    /// `Authorization: Basic <base64(user:pass)>`
    Basic { username: String, password: String },
}

impl AuthCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub fn api_key(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            header: header.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer credentials from `KAGENT_API_TOKEN`, if set and non-blank
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Bearer credentials from a key/value lookup
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(TOKEN_ENV)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(Self::Bearer)
    }

    /// Name of the header these credentials are sent in
    pub fn header_name(&self) -> &str {
        match self {
            AuthCredentials::ApiKey { header, .. } => header,
            AuthCredentials::Bearer(_) | AuthCredentials::Basic { .. } => "Authorization",
        }
    }

    /// Value of the header these credentials are sent in
    pub fn header_value(&self) -> String {
        match self {
            AuthCredentials::Bearer(token) => format!("Bearer {token}"),
            AuthCredentials::ApiKey { key, .. } => key.clone(),
            AuthCredentials::Basic { username, password } => {
                let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }

    /// Header name and value as one pair
    pub fn to_header(&self) -> (String, String) {
        (self.header_name().to_string(), self.header_value())
    }
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthCredentials::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            AuthCredentials::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("key", &"<redacted>")
                .finish(),
            AuthCredentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Layer that stamps gateway credentials onto every invocation
#[derive(Debug, Clone)]
pub struct AuthLayer {
    credentials: AuthCredentials,
}

impl AuthLayer {
    pub fn new(credentials: AuthCredentials) -> Self {
        Self { credentials }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(AuthCredentials::bearer(token))
    }

    pub fn api_key(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(AuthCredentials::api_key(key, header))
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            credentials: self.credentials.clone(),
        }
    }
}

/// Service produced by [`AuthLayer`]
///
/// Overwrites any credentials already present on the request context.
#[derive(Debug, Clone)]
pub struct AuthService<S> {
    inner: S,
    credentials: AuthCredentials,
}

impl<S> Service<InvocationRequest> for AuthService<S>
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

    fn call(&mut self, mut req: InvocationRequest) -> Self::Future {
        req.context.auth = Some(self.credentials.clone());

        // Take the service that was driven to readiness, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower::ServiceExt;

    use crate::{
        codec::{JsonRpcCodec, JsonRpcId},
        protocol::operation::SendMessage,
        service::{InvocationService, RequestContext},
        transport::mock::MockTransport,
    };

    use super::*;

    #[test]
    fn test_gateway_headers() {
        let cases = [
            (AuthCredentials::bearer("t0k"), "Authorization", "Bearer t0k"),
            (AuthCredentials::api_key("k-1", "X-Gateway-Key"), "X-Gateway-Key", "k-1"),
            (AuthCredentials::basic("user", "pass"), "Authorization", "Basic dXNlcjpwYXNz"),
        ];

        for (creds, header, value) in cases {
            assert_eq!(creds.to_header(), (header.to_string(), value.to_string()));
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!(
            "{:?} {:?} {:?}",
            AuthCredentials::bearer("s3cret"),
            AuthCredentials::api_key("s3cret", "X-Gateway-Key"),
            AuthCredentials::basic("ops", "s3cret"),
        );

        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("X-Gateway-Key"));
        assert!(rendered.contains("ops"));
    }

    #[test]
    fn test_token_from_lookup() {
        let creds = AuthCredentials::from_lookup(|key| {
            (key == TOKEN_ENV).then(|| " gw-token \n".to_string())
        });

        assert_eq!(creds.map(|c| c.header_value()), Some("Bearer gw-token".to_string()));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        assert!(AuthCredentials::from_lookup(|_| Some("   ".to_string())).is_none());
        assert!(AuthCredentials::from_lookup(|_| None).is_none());
    }

    #[tokio::test]
    async fn test_layer_replaces_context_credentials() {
        let transport = MockTransport::json(r#"{"result":{}}"#);
        let core = InvocationService::new(transport.clone(), Arc::new(JsonRpcCodec));
        let mut service = AuthLayer::api_key("k-123", "X-Gateway-Key").layer(core);

        let operation = SendMessage::new("agent", "hi", "ctx", JsonRpcId::Number(1));
        let context = RequestContext {
            auth: Some(AuthCredentials::bearer("stale")),
            ..RequestContext::default()
        };
        let request = InvocationRequest::new(operation, context);

        service.ready().await.unwrap().call(request).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.headers["X-Gateway-Key"], "k-123");
        assert!(!sent.headers.contains_key("Authorization"));
    }
}
