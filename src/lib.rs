//! # kagent A2A
//!
//! A Tower-based client for invoking kagent agents over the A2A protocol.
//!
//! A call sends one user message to a named agent as a JSON-RPC 2.0
//! `message/send` request, correlated by a context id, and extracts the reply
//! text from whichever shape the agent answered with.
//!
//! ## Features
//!
//! - **Ordered reply extraction**: status message first, then artifacts, then
//!   the raw envelope as text. Unknown shapes never fail a call.
//! - **Distinct failures**: transport, timeout and decode errors are separate
//!   variants so callers can choose their own retry policy.
//! - **Composable middleware**: auth and validation as Tower layers
//! - **Async**: Built on tokio; one client serves concurrent calls
//!
//! ## Example
//!
//! ```rust,no_run
//! use kagent_a2a::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::parse("http://localhost:8083")?;
//!     let client = AgentClientBuilder::new_http(config)
//!         .with_timeout(Duration::from_secs(120))
//!         .build()?;
//!
//!     let reply = client.ask("observability-agent", "ping").await?;
//!     println!("Agent said: {reply}");
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod layer;
pub mod protocol;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{AgentClient, AgentClientBuilder, ClientConfig, Session},
        protocol::error::{DecodeError, InvocationError},
        protocol::{AgentReply, Message, MessagePart, ReplyKind, Role},
        service::InvocationResponse,
    };
}
