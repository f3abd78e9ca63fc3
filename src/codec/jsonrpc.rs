//! JSON-RPC 2.0 codec for A2A protocol
//!
//! This codec wraps a `message/send` operation in a JSON-RPC 2.0 envelope and
//! unwraps whatever the agent sends back, keeping the raw document for the
//! degraded text fallback.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    codec::Codec,
    protocol::{
        error::{DecodeError, InvocationError},
        lenient,
        message::Message,
        operation::SendMessage,
        task::ResultPayload,
    },
};

/// A JSON-RPC 2.0 call identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    Number(i64),
    String(String),
}

impl fmt::Display for JsonRpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonRpcId::Number(n) => write!(f, "{}", n),
            JsonRpcId::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl JsonRpcId {
    /// Whether a response id is this id, with no coercion between types
    pub fn matches(&self, id: &Value) -> bool {
        match (self, id) {
            (JsonRpcId::Number(n), Value::Number(m)) => m.as_i64() == Some(*n),
            (JsonRpcId::String(s), Value::String(t)) => s == t,
            _ => false,
        }
    }
}

impl From<i64> for JsonRpcId {
    fn from(id: i64) -> Self {
        JsonRpcId::Number(id)
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: SendMessageParams<'a>,
    id: &'a JsonRpcId,
}

/// Parameters of a `message/send` call
#[derive(Debug, Serialize)]
struct SendMessageParams<'a> {
    message: &'a Message,
    #[serde(rename = "contextId")]
    context_id: &'a str,
}

/// JSON-RPC 2.0 response envelope
///
/// Every member is optional: a body that lacks them still decodes, and the
/// reply falls back to the raw document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub jsonrpc: Option<String>,

    /// Success payload
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<ResultPayload>,

    /// Protocol-level error
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<JsonRpcError>,

    /// Echoed call id, kept as sent so any non-null value is correlated
    #[serde(default)]
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// A decoded response: the typed envelope plus the document it came from
#[derive(Debug, Clone)]
pub struct DecodedEnvelope {
    pub raw: Value,
    pub envelope: JsonRpcResponse,
}

impl DecodedEnvelope {
    /// The raw envelope serialized as compact JSON
    pub fn raw_text(&self) -> String {
        self.raw.to_string()
    }
}

/// JSON-RPC 2.0 codec for the A2A `message/send` binding
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Bytes, InvocationError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(InvocationError::Encode)
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &SendMessage) -> Result<Bytes, InvocationError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: operation.rpc_method(),
            params: SendMessageParams {
                message: &operation.message,
                context_id: &operation.context_id,
            },
            id: &operation.call_id,
        };

        encode(&request)
    }

    fn decode_response(
        &self,
        body: &[u8],
        expected_id: &JsonRpcId,
    ) -> Result<DecodedEnvelope, InvocationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody.into());
        }

        let raw: Value = serde_json::from_slice(body).map_err(DecodeError::Malformed)?;

        // Anything but an object has no envelope members at all
        let envelope = if raw.is_object() {
            JsonRpcResponse::deserialize(&raw).unwrap_or_default()
        } else {
            JsonRpcResponse::default()
        };

        // A null or missing id is accepted: servers omit it on some errors
        if let Some(actual) = &envelope.id {
            if !expected_id.matches(actual) {
                tracing::warn!(expected = %expected_id, actual = %actual, "JSON-RPC id mismatch");
                return Err(DecodeError::IdMismatch {
                    expected: expected_id.clone(),
                    actual: actual.clone(),
                }
                .into());
            }
        }

        Ok(DecodedEnvelope { raw, envelope })
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}
