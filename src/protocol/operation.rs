//! The `message/send` operation

use super::message::Message;
use crate::codec::JsonRpcId;

/// JSON-RPC method name for a non-streaming send
pub const SEND_MESSAGE_METHOD: &str = "message/send";

/// Send a message to a named agent
///
/// One of these is built per invocation and dropped once the reply is extracted.
#[derive(Debug, Clone)]
pub struct SendMessage {
    /// Name of the target agent, interpolated verbatim into the endpoint
    pub agent_name: String,

    /// The message to send
    pub message: Message,

    /// Context identifier grouping calls into one logical session
    pub context_id: String,

    /// JSON-RPC call identifier, echoed back by the agent
    pub call_id: JsonRpcId,
}

impl SendMessage {
    /// Create a send operation for a single user text
    pub fn new(
        agent_name: impl Into<String>,
        text: impl Into<String>,
        context_id: impl Into<String>,
        call_id: JsonRpcId,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            message: Message::user(text),
            context_id: context_id.into(),
            call_id,
        }
    }

    /// Get the HTTP endpoint path under the given agent namespace
    pub fn endpoint(&self, namespace: &str) -> String {
        format!("/api/a2a/{}/{}/", namespace, self.agent_name)
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        "POST"
    }

    /// Get the JSON-RPC method name
    pub fn rpc_method(&self) -> &'static str {
        SEND_MESSAGE_METHOD
    }
}
