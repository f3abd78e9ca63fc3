//! Invocation service response types

use serde_json::Value;

use crate::{
    codec::{DecodedEnvelope, JsonRpcError, JsonRpcId},
    protocol::{reply::AgentReply, task::TaskState, ReplyKind},
};

/// Response from one agent invocation
#[derive(Debug, Clone)]
pub struct InvocationResponse {
    /// Extracted reply text (or the raw envelope as text)
    pub text: String,

    /// Which channel the text came from
    pub reply_kind: ReplyKind,

    /// Context identifier the call was sent with
    pub context_id: String,

    /// Call identifier the call was sent with
    pub call_id: JsonRpcId,

    /// Task state reported by the agent, if any
    pub state: Option<TaskState>,

    /// JSON-RPC error object, if the agent answered with one
    pub rpc_error: Option<JsonRpcError>,

    /// The decoded response document
    pub raw: Value,
}

impl InvocationResponse {
    /// Build a response by extracting the reply from a decoded envelope
    pub fn from_envelope(decoded: DecodedEnvelope, context_id: String, call_id: JsonRpcId) -> Self {
        let result = decoded.envelope.result.as_ref();
        let reply = AgentReply::classify(result);
        let text = reply.text(|| decoded.raw_text());
        let reply_kind = reply.kind();
        let state = result.and_then(|r| r.state());

        Self {
            text,
            reply_kind,
            context_id,
            call_id,
            state,
            rpc_error: decoded.envelope.error,
            raw: decoded.raw,
        }
    }

    /// Whether the reply text is the raw envelope rather than extracted text
    pub fn is_fallback(&self) -> bool {
        self.reply_kind == ReplyKind::Unrecognized
    }

    /// Consume the response, keeping only the text
    pub fn into_text(self) -> String {
        self.text
    }
}
