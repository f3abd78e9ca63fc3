//! HTTP query adapter
//!
//! Exposes one agent behind `POST /query` and answers `GET /health`. Any
//! invocation failure becomes a JSON `{"detail": ...}` body with a status
//! code; validation failures are 400, everything else is 500.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    client::{AgentClient, InvocationStack},
    protocol::error::InvocationError,
};

/// Agent queried when none is configured
pub const DEFAULT_AGENT: &str = "observability-agent";

/// Listen address used when none is configured
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Configuration for the query adapter
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Agent every query is sent to
    pub agent_name: String,
}

impl ServerConfig {
    /// Load from `QUERY_BIND_ADDR` and `KAGENT_AGENT_NAME`
    pub fn from_env() -> Result<Self, InvocationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a key/value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvocationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("QUERY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .map_err(|e| InvocationError::Config(format!("invalid bind address {addr:?}: {e}")))?;

        Ok(Self {
            bind_addr,
            agent_name: lookup("KAGENT_AGENT_NAME").unwrap_or_else(|| DEFAULT_AGENT.to_string()),
        })
    }
}

/// Shared state of the query adapter
#[derive(Clone)]
pub struct AppState {
    client: Arc<AgentClient<InvocationStack>>,
    agent_name: Arc<str>,
}

impl AppState {
    pub fn new(client: AgentClient<InvocationStack>, agent_name: impl Into<Arc<str>>) -> Self {
        Self {
            client: Arc::new(client),
            agent_name: agent_name.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub response: String,
}

/// An invocation failure rendered as an HTTP error
#[derive(Debug)]
pub struct QueryError(InvocationError);

impl From<InvocationError> for QueryError {
    fn from(err: InvocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            InvocationError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = ?self.0, "query failed");

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

/// Build the adapter's routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .with_state(state)
}

/// Bind and serve the adapter until the process exits
pub async fn serve(config: ServerConfig, client: AgentClient<InvocationStack>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let app = router(AppState::new(client, config.agent_name));

    axum::serve(listener, app).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, QueryError> {
    let response = state.client.ask(&state.agent_name, &request.query).await?;

    Ok(Json(QueryResponse {
        query: request.query,
        response,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use crate::{
        client::{AgentClientBuilder, ClientConfig},
        transport::{mock::MockTransport, TransportResponse},
    };

    use super::*;

    fn app(transport: MockTransport) -> Router {
        let client = AgentClientBuilder::new(ClientConfig::parse("http://kagent:8083").unwrap())
            .with_transport(transport)
            .build()
            .unwrap();
        router(AppState::new(client, DEFAULT_AGENT))
    }

    fn query_request(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(MockTransport::json(r#"{"result":{}}"#));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_query_success() {
        let transport = MockTransport::json(
            r#"{"result":{"status":{"message":{"parts":[{"kind":"text","text":"pong"}]}}}}"#,
        );
        let app = app(transport.clone());

        let response = app.oneshot(query_request("ping")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"query": "ping", "response": "pong"})
        );
        assert_eq!(
            transport.requests()[0].endpoint,
            "/api/a2a/kagent/observability-agent/"
        );
    }

    #[tokio::test]
    async fn test_query_upstream_failure() {
        let transport =
            MockTransport::new(|_| TransportResponse::new(503).body("upstream unavailable"));
        let app = app(transport);

        let response = app.oneshot(query_request("ping")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"detail": "Transport error: HTTP 503"})
        );
    }

    #[tokio::test]
    async fn test_query_empty() {
        let app = app(MockTransport::json(r#"{"result":{}}"#));

        let response = app.oneshot(query_request("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.agent_name, "observability-agent");
    }

    #[test]
    fn test_server_config_invalid_addr() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "QUERY_BIND_ADDR").then(|| "localhost".to_string())
        });

        assert!(matches!(result, Err(InvocationError::Config(_))));
    }
}
