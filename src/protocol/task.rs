//! Task status and result payload types

use serde::{Deserialize, Serialize};

use super::{lenient, lenient_items, message::Message, Artifact};

/// Status of the task an agent created for a message
///
/// The embedded message is the agent's live answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Lifecycle state of the task
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<TaskState>,

    /// Message the agent attached to the status
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<Message>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

/// Task state in the A2A protocol lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    AuthRequired,
    Completed,
    Failed,
    Canceled,
    Rejected,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled | TaskState::Rejected
        )
    }
}

/// Success payload of a `message/send` call
///
/// Every field is optional and decoded on its own, so one malformed field
/// never hides the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    /// Task identifier assigned by the agent
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Context identifier echoed by the agent
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_id: Option<String>,

    /// Result kind (`task` or `message`)
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TaskStatus>,

    /// Secondary output channel
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub artifacts: Option<Vec<Artifact>>,
}

impl ResultPayload {
    /// The message embedded in the status, if any
    pub fn status_message(&self) -> Option<&Message> {
        self.status.as_ref().and_then(|s| s.message.as_ref())
    }

    /// The state of the task, if reported
    pub fn state(&self) -> Option<TaskState> {
        self.status.as_ref().and_then(|s| s.state)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_status_payload() {
        let payload: ResultPayload = serde_json::from_value(json!({
            "id": "task-1",
            "contextId": "ctx-1",
            "kind": "task",
            "status": {
                "state": "completed",
                "message": {"role": "agent", "parts": [{"kind": "text", "text": "done"}]},
                "timestamp": "2025-01-01T00:00:00Z"
            }
        }))
        .unwrap();

        assert_eq!(payload.context_id.as_deref(), Some("ctx-1"));
        assert_eq!(payload.state(), Some(TaskState::Completed));
        assert!(payload.state().unwrap().is_terminal());
        assert_eq!(payload.status_message().unwrap().parts.len(), 1);
    }

    #[test]
    fn test_unknown_state_is_dropped() {
        let payload: ResultPayload =
            serde_json::from_value(json!({"status": {"state": "thinking-hard"}})).unwrap();

        assert!(payload.status.is_some());
        assert_eq!(payload.state(), None);
    }

    #[test]
    fn test_malformed_field_does_not_hide_others() {
        let payload: ResultPayload = serde_json::from_value(json!({
            "status": "not-an-object",
            "artifacts": [{"parts": [{"text": "from artifact"}]}]
        }))
        .unwrap();

        assert!(payload.status.is_none());
        assert_eq!(payload.artifacts.unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_artifact_keeps_position() {
        let payload: ResultPayload = serde_json::from_value(json!({
            "artifacts": [{"parts": [{"text": "a"}]}, 42],
            "status": {"timestamp": 1700000000, "state": "working"}
        }))
        .unwrap();

        let artifacts = payload.artifacts.unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].parts[0].as_text(), Some("a"));
        assert_eq!(artifacts[1], Artifact::default());
        assert_eq!(payload.status.unwrap().state, Some(TaskState::Working));
    }
}
