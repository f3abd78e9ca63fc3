//! Query adapter that forwards `POST /query` to one kagent agent

use anyhow::{Context, Result};
use kagent_a2a::{
    client::{AgentClientBuilder, ClientConfig},
    layer::AuthCredentials,
    server::{self, ServerConfig},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kagent_a2a=info,kagent_query=info")),
        )
        .init();

    let client_config = ClientConfig::from_env().context("failed to load client configuration")?;
    let server_config = ServerConfig::from_env().context("failed to load server configuration")?;

    info!(
        base_url = %client_config.base_url,
        namespace = %client_config.namespace,
        model = %client_config.default_model,
        timeout = ?client_config.default_timeout,
        "kagent client configured"
    );

    let mut builder = AgentClientBuilder::new_http(client_config);
    if let Some(credentials) = AuthCredentials::from_env() {
        info!("gateway token configured");
        builder = builder.with_auth(credentials);
    }

    let client = builder.build().context("failed to build kagent client")?;

    info!(
        addr = %server_config.bind_addr,
        agent = %server_config.agent_name,
        "query adapter listening"
    );

    server::serve(server_config, client)
        .await
        .context("query adapter stopped")
}
