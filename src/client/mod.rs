//! High-level client API for agent invocations

pub mod agent;
pub mod builder;
pub mod config;

pub use agent::{new_context_id, AgentClient, Session};
pub use builder::{AgentClientBuilder, InvocationStack};
pub use config::ClientConfig;
