//! Core A2A protocol types and definitions

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod error;
pub mod message;
pub mod operation;
pub mod reply;
pub mod task;

pub use error::{DecodeError, InvocationError, InvocationResult};
pub use message::{Message, MessagePart, PartKind, Role};
pub use operation::SendMessage;
pub use reply::{AgentReply, ReplyKind};
pub use task::{ResultPayload, TaskState, TaskStatus};

/// Artifacts carry agent output outside the status message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique identifier of the Artifact
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub artifact_id: Option<String>,

    /// A human readable name for the Artifact
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Ordered contents of the Artifact
    #[serde(default, deserialize_with = "lenient_vec")]
    pub parts: Vec<MessagePart>,
}

/// Deserialize an optional field, treating a value of the wrong shape as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserialize an optional array element by element
///
/// An element of the wrong shape becomes `T::default()` in place, so the
/// positions of the others are kept. Anything but an array is absent.
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(None),
    };

    Ok(Some(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    ))
}

/// Like [`lenient_items`], with an absent array read as empty
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_items(deserializer)?.unwrap_or_default())
}
