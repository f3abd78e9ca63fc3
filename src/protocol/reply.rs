//! Reply extraction from a decoded result payload

use super::{message::MessagePart, task::ResultPayload};

/// Where the agent put its answer
///
/// Produced once per response by [`AgentReply::classify`]. The order of the
/// checks is the priority: a status message is the live answer, artifacts are
/// a secondary channel, and anything else degrades to the raw envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentReply<'a> {
    /// First part of the status message
    StatusMessage(&'a MessagePart),

    /// First part of the first artifact
    Artifact(&'a MessagePart),

    /// No recognized reply shape
    Unrecognized,
}

impl<'a> AgentReply<'a> {
    /// Classify a result payload (`None` when the envelope had no `result`)
    pub fn classify(result: Option<&'a ResultPayload>) -> Self {
        let Some(result) = result else {
            return AgentReply::Unrecognized;
        };

        if let Some(part) = result.status_message().and_then(|m| m.first_part()) {
            return AgentReply::StatusMessage(part);
        }

        if let Some(part) = result
            .artifacts
            .as_ref()
            .and_then(|artifacts| artifacts.first())
            .and_then(|artifact| artifact.parts.first())
        {
            return AgentReply::Artifact(part);
        }

        AgentReply::Unrecognized
    }

    /// The reply kind, without the borrowed part
    pub fn kind(&self) -> ReplyKind {
        match self {
            AgentReply::StatusMessage(_) => ReplyKind::StatusMessage,
            AgentReply::Artifact(_) => ReplyKind::Artifact,
            AgentReply::Unrecognized => ReplyKind::Unrecognized,
        }
    }

    /// Extract the reply text
    ///
    /// A selected part without a `text` field yields the raw envelope text,
    /// the same as an unrecognized shape.
    pub fn text(&self, raw: impl FnOnce() -> String) -> String {
        match self {
            AgentReply::StatusMessage(part) | AgentReply::Artifact(part) => match part.as_text() {
                Some(text) => text.to_string(),
                None => raw(),
            },
            AgentReply::Unrecognized => raw(),
        }
    }
}

/// Owned tag of an [`AgentReply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    StatusMessage,
    Artifact,
    Unrecognized,
}
