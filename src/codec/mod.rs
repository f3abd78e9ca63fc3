//! Serialization codecs for the agent wire protocol

pub mod jsonrpc;

pub use jsonrpc::{DecodedEnvelope, JsonRpcCodec, JsonRpcError, JsonRpcId, JsonRpcResponse};

use crate::protocol::{error::InvocationError, operation::SendMessage};
use bytes::Bytes;

/// Codec trait for encoding requests and decoding agent responses
pub trait Codec: Send + Sync {
    /// Serialize an operation to bytes for transport
    fn encode_request(&self, operation: &SendMessage) -> Result<Bytes, InvocationError>;

    /// Deserialize a response body
    ///
    /// # Arguments
    ///
    /// * `body` - The response body bytes
    /// * `expected_id` - The call identifier the response must echo
    ///
    /// # Errors
    ///
    /// Only unparsable bodies and id mismatches fail. Unknown shapes decode.
    fn decode_response(
        &self,
        body: &[u8],
        expected_id: &JsonRpcId,
    ) -> Result<DecodedEnvelope, InvocationError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}
